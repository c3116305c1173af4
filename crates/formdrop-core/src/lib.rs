//! Formdrop Core Library
//!
//! Configuration, error types, the country reference table and the submission
//! validator shared by the HTTP service and the CLI. Nothing in here performs I/O
//! beyond reading the environment.

pub mod config;
pub mod countries;
pub mod error;
pub mod submission;

// Re-export commonly used types
pub use config::{CmsConfig, Config, LogFormat};
pub use countries::{CountryOption, CountryTable};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use submission::{
    Attachment, FieldError, ImageMimeType, RawValue, Submission, SubmissionSchema,
    SubmissionValidator, ValidationErrors,
};
