//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::feedback::{Notifier, ToastId};
use crate::screens::ScreenKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Screen shown in the main area
    pub current_screen: ScreenKey,
    /// Toasts currently on screen, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add a toast, returning its id
pub fn store_push_toast(store: &AppStore, kind: ToastKind, text: &str) -> u64 {
    let next_id = store.next_toast_id();
    let id = {
        let mut next = next_id.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast {
        id,
        kind,
        text: text.to_string(),
    });
    id
}

/// Remove a toast by ID
pub fn store_remove_toast(store: &AppStore, id: u64) {
    store.toasts().write().retain(|toast| toast.id != id);
}

/// Feedback toasts rendered from the store
#[derive(Clone, Copy)]
pub struct UiNotifier {
    store: AppStore,
    /// How long success/error toasts stay up
    duration_ms: u32,
}

impl UiNotifier {
    pub fn new(store: AppStore, duration_ms: u32) -> Self {
        Self { store, duration_ms }
    }

    fn flash(&self, kind: ToastKind, text: &str) {
        let store = self.store;
        let id = store_push_toast(&store, kind, text);
        gloo_timers::callback::Timeout::new(self.duration_ms, move || {
            store_remove_toast(&store, id);
        })
        .forget();
    }
}

impl Notifier for UiNotifier {
    fn loading(&self, text: &str) -> ToastId {
        ToastId(store_push_toast(&self.store, ToastKind::Loading, text))
    }

    fn dismiss(&self, id: ToastId) {
        store_remove_toast(&self.store, id.0);
    }

    fn success(&self, text: &str) {
        self.flash(ToastKind::Success, text);
    }

    fn error(&self, text: &str) {
        self.flash(ToastKind::Error, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast_ids(store: &AppStore) -> Vec<u64> {
        store.toasts().with_untracked(|toasts| toasts.iter().map(|t| t.id).collect())
    }

    #[test]
    fn test_push_toast_assigns_fresh_ids() {
        let store = Store::new(AppState::default());

        let first = store_push_toast(&store, ToastKind::Loading, "正在删除");
        let second = store_push_toast(&store, ToastKind::Error, "删除失败");

        assert_ne!(first, second);
        assert_eq!(toast_ids(&store), vec![first, second]);
        assert_eq!(store.next_toast_id().get_untracked(), second);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let store = Store::new(AppState::default());
        let notifier = UiNotifier::new(store, 3000);

        let saving = notifier.loading("正在保存");
        let kept = store_push_toast(&store, ToastKind::Success, "保存成功");
        notifier.dismiss(saving);

        assert_eq!(toast_ids(&store), vec![kept]);
    }
}
