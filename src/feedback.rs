//! Operation Feedback
//!
//! Loading -> success/failure toasts around a mutating remote call.
//! Callers only ever learn whether the call worked.

use std::fmt;
use std::future::Future;

use crate::api::ApiResult;

/// Handle to an "in progress" indicator, consumed when dismissed
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

/// Sink for user-facing feedback messages
pub trait Notifier {
    /// Show a non-blocking in-progress indicator
    fn loading(&self, text: &str) -> ToastId;
    fn dismiss(&self, id: ToastId);
    fn success(&self, text: &str);
    fn error(&self, text: &str);
}

/// Title of the dialog guarding a single-row delete
pub const DELETE_CONFIRM_TITLE: &str = "是否删除记录?";
/// Body of the dialog guarding a single-row delete
pub const DELETE_CONFIRM_CONTENT: &str = "删除的记录不能恢复,请确认!";

/// Mutating operations that get feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
    Delete,
    AssignMenus,
}

/// Texts for the three phases of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub pending: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

impl Operation {
    pub fn messages(self) -> Messages {
        match self {
            Operation::Add => Messages {
                pending: "正在添加",
                success: "添加成功",
                failure: "添加失败请重试！",
            },
            Operation::Update => Messages {
                pending: "正在更新",
                success: "更新成功",
                failure: "更新失败请重试！",
            },
            Operation::Delete => Messages {
                pending: "正在删除",
                success: "删除成功，即将刷新",
                failure: "删除失败，请重试",
            },
            Operation::AssignMenus => Messages {
                pending: "正在分配",
                success: "分配成功",
                failure: "分配失败请重试！",
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::AssignMenus => "assign menus",
        };
        f.write_str(name)
    }
}

/// Run `call` between a loading toast and its outcome toast.
///
/// The error is logged, never shown; the operator gets the generic text.
pub async fn with_feedback<N, F, T>(notifier: &N, op: Operation, call: F) -> bool
where
    N: Notifier + ?Sized,
    F: Future<Output = ApiResult<T>>,
{
    let messages = op.messages();
    let hide = notifier.loading(messages.pending);

    match call.await {
        Ok(_) => {
            notifier.dismiss(hide);
            notifier.success(messages.success);
            true
        }
        Err(err) => {
            log::warn!("[FEEDBACK] {} failed: {}", op, err);
            notifier.dismiss(hide);
            notifier.error(messages.failure);
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingNotifier, Shown};
    use super::*;
    use crate::api::ApiError;

    #[tokio::test]
    async fn test_success_dismisses_once_and_reports() {
        let notifier = RecordingNotifier::default();

        let ok = with_feedback(&notifier, Operation::Add, async { Ok::<_, ApiError>(()) }).await;

        assert!(ok);
        assert_eq!(
            notifier.events(),
            vec![
                Shown::Loading(0, "正在添加".into()),
                Shown::Dismissed(0),
                Shown::Success("添加成功".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_dismisses_once_and_shows_generic_text() {
        let notifier = RecordingNotifier::default();

        let ok = with_feedback(&notifier, Operation::Delete, async {
            Err::<(), _>(ApiError::Rejected("外键约束".into()))
        })
        .await;

        assert!(!ok);
        assert_eq!(notifier.count(|e| matches!(e, Shown::Dismissed(_))), 1);
        assert_eq!(notifier.count(|e| matches!(e, Shown::Error(_))), 1);
        assert_eq!(notifier.count(|e| matches!(e, Shown::Success(_))), 0);
        // Server detail never reaches the operator
        assert!(notifier.events().contains(&Shown::Error("删除失败，请重试".into())));
    }

    #[test]
    fn test_every_operation_has_texts() {
        for op in [Operation::Add, Operation::Update, Operation::Delete, Operation::AssignMenus] {
            let m = op.messages();
            assert!(!m.pending.is_empty() && !m.success.is_empty() && !m.failure.is_empty());
        }
    }

    #[test]
    fn test_delete_confirm_texts() {
        assert_eq!(DELETE_CONFIRM_TITLE, "是否删除记录?");
        assert_eq!(DELETE_CONFIRM_CONTENT, "删除的记录不能恢复,请确认!");
    }
}
