//! Application Context
//!
//! Shared services provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{RemoteSource, RestSource};
use crate::config::AppConfig;
use crate::controller::{CrudController, TableState};
use crate::screens::ScreenSpec;
use crate::store::UiNotifier;

/// Controller type every screen runs with in the browser
pub type ScreenController = CrudController<UiNotifier, RwSignal<TableState>>;

/// App-wide services provided via context
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    /// Shared HTTP client; cloning is cheap
    client: reqwest::Client,
    pub notifier: UiNotifier,
}

impl AppContext {
    pub fn new(config: AppConfig, notifier: UiNotifier) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            notifier,
        }
    }

    /// REST source for the entity behind `spec`
    pub fn source_for(&self, spec: &ScreenSpec) -> Arc<dyn RemoteSource> {
        Arc::new(RestSource::new(
            self.client.clone(),
            self.config.api_base.clone(),
            spec.path,
            spec.delete_one,
            spec.batch_key,
        ))
    }

    /// Fresh state and controller for one mounted screen
    pub fn controller_for(&self, spec: &ScreenSpec) -> ScreenController {
        let state = RwSignal::new(TableState::for_screen(spec, self.config.page_size));
        CrudController::new(self.source_for(spec), self.notifier, state, spec.tree.clone())
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
