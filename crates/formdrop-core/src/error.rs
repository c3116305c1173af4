//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Each variant describes its
//! own HTTP presentation through [`ErrorMetadata`], so the API layer only has to render it.

use crate::submission::ValidationErrors;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures caused by a downstream system
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The content store refused or failed an operation.
    #[error("External store error: {message}")]
    ExternalStore {
        message: String,
        detail: Option<String>,
    },

    /// The request body could not be read as a form.
    #[error("Invalid form data: {0}")]
    InvalidFormData(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::Validation(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Validation(_) => (400, "VALIDATION_ERROR", false, LogLevel::Debug),
        AppError::ExternalStore { .. } => (400, "EXTERNAL_STORE_ERROR", false, LogLevel::Warn),
        AppError::InvalidFormData(_) => (400, "INVALID_FORM_DATA", false, LogLevel::Debug),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", true, LogLevel::Error)
        }
    }
}

impl AppError {
    pub fn external_store(message: impl Into<String>) -> Self {
        AppError::ExternalStore {
            message: message.into(),
            detail: None,
        }
    }

    pub fn external_store_with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::ExternalStore {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::ExternalStore { .. } => "ExternalStore",
            AppError::InvalidFormData(_) => "InvalidFormData",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Secondary detail rendered as the `error` field of a response, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::Validation(_) => None,
            AppError::ExternalStore { detail, .. } => detail.clone(),
            AppError::InvalidFormData(msg) | AppError::Internal(msg) => Some(msg.clone()),
            AppError::InternalWithSource { message, .. } => Some(message.clone()),
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::ExternalStore { message, .. } => message.clone(),
            AppError::InvalidFormData(_) => "Invalid form data".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::FieldError;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::from(ValidationErrors(vec![FieldError::new(
            "country",
            "Country is required",
        )]));
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_error_metadata_external_store() {
        let err = AppError::external_store("No parent record found for this submission");
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "EXTERNAL_STORE_ERROR");
        assert_eq!(
            err.client_message(),
            "No parent record found for this submission"
        );
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert_eq!(err.detail(), None);

        let err = AppError::external_store_with_detail("Transaction rejected", "quota exceeded");
        assert_eq!(err.detail().as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn test_error_metadata_invalid_form_data() {
        let err = AppError::InvalidFormData("missing boundary".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "Invalid form data");
        assert_eq!(err.detail().as_deref(), Some("missing boundary"));
    }

    #[test]
    fn test_error_metadata_internal() {
        let err = AppError::Internal("disk on fire".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_anyhow_conversion_keeps_chain() {
        let err = AppError::from(anyhow::anyhow!("root cause").context("while committing"));
        assert_eq!(err.error_type(), "Internal");
        assert_eq!(err.detail().as_deref(), Some("while committing"));
        assert!(err.detailed_message().contains("Caused by"));
    }
}
