//! Application setup and initialization
//!
//! All application initialization logic lives here instead of main.rs for
//! better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use indoc_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    telemetry::init_tracing();

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Initialize repositories, the task queue, and the application state
    let state = services::initialize_services(&config, pool)?;

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
