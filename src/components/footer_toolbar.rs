//! Footer Toolbar Component
//!
//! Pinned bar shown while rows are selected.

use leptos::prelude::*;

#[component]
pub fn FooterToolbar(
    /// Number of selected rows
    #[prop(into)]
    count: Signal<usize>,
    #[prop(into)] on_batch_delete: Callback<()>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="footer-toolbar">
            <span class="selection-count">
                "已选择 " <strong>{move || count.get()}</strong> " 项"
            </span>
            <button class="link-btn" on:click=move |_| on_clear.run(())>"取消选择"</button>
            <button class="danger" on:click=move |_| on_batch_delete.run(())>"批量删除"</button>
        </div>
    }
}
