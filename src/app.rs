//! Mall Admin Frontend App
//!
//! Main application component: screen tabs over one CRUD table.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{CrudTable, ScreenTabBar, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, UiNotifier};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let notifier = UiNotifier::new(store, config.toast_ms);
    provide_context(AppContext::new(config, notifier));

    view! {
        <div class="admin-layout">
            <ScreenTabBar />

            <main class="main-content">
                // Each switch mounts a fresh table with its own state
                {move || {
                    let key = store.current_screen().get();
                    log::debug!("[APP] Mounting {:?}", key);
                    view! { <CrudTable spec=key.spec() /> }
                }}
            </main>

            <ToastHost />
        </div>
    }
}
