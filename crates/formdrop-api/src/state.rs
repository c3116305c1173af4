//! Application state shared by all handlers.

use std::sync::Arc;

use formdrop_cms::ContentStore;
use formdrop_core::{Config, SubmissionValidator};
use serde::Serialize;
use utoipa::ToSchema;

/// What the service does with submissions that pass validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceMode {
    /// Acknowledge and discard
    ValidateOnly,
    /// Upload attachments and commit records to the content store
    Forwarding,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub validator: SubmissionValidator,
    pub content_store: Option<Arc<dyn ContentStore>>,
}

impl AppState {
    pub fn new(config: Config, content_store: Option<Arc<dyn ContentStore>>) -> Self {
        let validator = SubmissionValidator::new(
            formdrop_core::CountryTable::global(),
            config.submission_schema(),
        );
        Self {
            config,
            validator,
            content_store,
        }
    }

    pub fn mode(&self) -> ServiceMode {
        if self.content_store.is_some() {
            ServiceMode::Forwarding
        } else {
            ServiceMode::ValidateOnly
        }
    }
}
