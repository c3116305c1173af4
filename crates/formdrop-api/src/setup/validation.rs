//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use formdrop_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        if config.cors_origins().iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production - this is a security risk. \
                Please set specific allowed origins via CORS_ORIGINS environment variable."
            ));
        }

        if let Some(cms) = config.cms() {
            if cms.base_url.starts_with("http://") {
                tracing::warn!(
                    base_url = %cms.base_url,
                    "Content store is reached over plain HTTP in production"
                );
            }
        }
    }

    if config.max_body_size_bytes() < formdrop_core::submission::MAX_FILE_SIZE as usize {
        tracing::warn!(
            max_body_size_bytes = config.max_body_size_bytes(),
            "MAX_BODY_SIZE_MB is below the per-file limit - oversized files are rejected as malformed forms"
        );
    }

    Ok(())
}
