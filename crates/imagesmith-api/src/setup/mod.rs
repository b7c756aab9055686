//! Application setup and initialization
//!
//! Everything `main` needs to go from a `Config` to a served router, kept
//! out of `main.rs` so integration tests can build the same app.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use imagesmith_core::Config;

use crate::state::AppState;

/// Build the shared state and the fully layered router
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let state = Arc::new(AppState::new(config.clone()));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
