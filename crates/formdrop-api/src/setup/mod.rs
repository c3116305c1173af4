//! Application setup and initialization
//!
//! Everything main.rs needs to go from a loaded `Config` to a ready router.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use formdrop_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        caption_enabled = config.caption_enabled(),
        "Configuration loaded and validated successfully"
    );

    let content_store = formdrop_cms::create_content_store(&config)
        .context("Failed to create content store client")?;

    let state = Arc::new(AppState::new(config.clone(), content_store));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
