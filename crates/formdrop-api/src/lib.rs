//! Formdrop API Library
//!
//! HTTP handlers, the multipart adapter, the forwarding service and application setup.

mod api_doc;
mod handlers;
mod services;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{ForwardReceipt, SubmissionService, UploadedFile};
pub use state::{AppState, ServiceMode};
