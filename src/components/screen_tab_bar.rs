//! Screen Tab Bar Component
//!
//! Tab bar for switching between entity screens in the main content area.

use leptos::prelude::*;

use crate::screens::ScreenKey;
use crate::store::{use_app_store, AppStateStoreFields};

/// Screen Tab Bar component
#[component]
pub fn ScreenTabBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="screen-tab-bar">
            {ScreenKey::ALL.into_iter().map(|key| {
                let is_active = move || store.current_screen().get() == key;
                let tab_class = move || {
                    if is_active() { "screen-tab active" } else { "screen-tab" }
                };

                view! {
                    <button
                        class=tab_class
                        on:click=move |_| {
                            if !is_active() {
                                log::info!("[APP] Switching to {:?}", key);
                                store.current_screen().set(key);
                            }
                        }
                    >
                        {key.spec().nav_label}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
