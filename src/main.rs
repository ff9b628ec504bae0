//! Mall Admin Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod controller;
mod feedback;
mod form;
mod logging;
mod models;
mod screens;
mod store;
mod tree;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    // Only fails when a logger is already installed
    let _ = logging::init(&config.log_level);
    if let Some(err) = config_error {
        log::warn!("[APP] {}, using defaults", err);
    }
    log::info!("[APP] Starting, api base {:?}", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
