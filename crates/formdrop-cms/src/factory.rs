use crate::{ContentStore, HttpContentStore, CmsResult};
use formdrop_core::Config;
use std::sync::Arc;

/// Create the content store client based on configuration.
///
/// Returns `None` when no `CMS_BASE_URL` is configured, which puts the service in
/// validate-only mode.
pub fn create_content_store(config: &Config) -> CmsResult<Option<Arc<dyn ContentStore>>> {
    let Some(cms) = config.cms() else {
        tracing::info!("No content store configured, running in validate-only mode");
        return Ok(None);
    };

    let store = HttpContentStore::from_config(cms)?;
    tracing::info!(
        base_url = %store.base_url(),
        has_default_token = cms.api_token.is_some(),
        "Content store client created"
    );
    Ok(Some(Arc::new(store)))
}
