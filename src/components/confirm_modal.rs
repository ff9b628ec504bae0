//! Confirm Modal Component
//!
//! Yes/no dialog gating a destructive action.

use leptos::prelude::*;

/// Modal confirmation dialog
///
/// # Arguments
/// * `title` - Dialog heading
/// * `content` - Question shown to the user
/// * `on_confirm` - Called when the user accepts
/// * `on_cancel` - Called when the user declines or clicks the backdrop
#[component]
pub fn ConfirmModal(
    #[prop(into)] title: String,
    #[prop(into)] content: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="modal confirm-modal" on:click=|ev| ev.stop_propagation()>
                <h3 class="modal-title">{title}</h3>
                <p class="modal-content">{content}</p>
                <div class="modal-actions">
                    <button class="cancel-btn" on:click=move |_| on_cancel.run(())>
                        "取消"
                    </button>
                    <button class="confirm-btn danger" on:click=move |_| on_confirm.run(())>
                        "确定"
                    </button>
                </div>
            </div>
        </div>
    }
}
