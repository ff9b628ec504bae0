//! Toast Host Component
//!
//! Renders the feedback toasts held in the app store.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Loading => "toast loading",
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    view! { <div class=class>{toast.text}</div> }
                }
            />
        </div>
    }
}
