//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Any `AppError` (or type
//! convertible into one) becomes an `HttpAppError` and renders with a consistent body.

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formdrop_cms::CmsError;
use formdrop_core::{AppError, ErrorMetadata, FieldError, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present for validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Secondary detail, hidden in production for sensitive errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from formdrop-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<CmsError> for HttpAppError {
    fn from(err: CmsError) -> Self {
        HttpAppError(AppError::ExternalStore {
            message: err.store_message().to_string(),
            detail: Some(err.to_string()),
        })
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidFormData(rejection.body_text()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type,
                code,
                "Request failed"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl HttpAppError {
    fn body(&self, is_production: bool) -> ErrorResponse {
        let app_error = &self.0;
        let code = app_error.error_code().to_string();

        if let AppError::Validation(errors) = app_error {
            return ErrorResponse {
                success: false,
                message: None,
                errors: Some(errors.errors().to_vec()),
                error: None,
                code,
            };
        }

        let hide_detail = is_production && app_error.is_sensitive();
        ErrorResponse {
            success: false,
            message: Some(app_error.client_message()),
            errors: None,
            error: if hide_detail { None } else { app_error.detail() },
            code,
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        (status, Json(self.body(is_production_env()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdrop_core::ValidationErrors;

    fn body_json(err: AppError, is_production: bool) -> serde_json::Value {
        serde_json::to_value(HttpAppError(err).body(is_production)).unwrap()
    }

    #[test]
    fn test_validation_body_lists_errors() {
        let err = AppError::Validation(ValidationErrors(vec![
            FieldError::new("uploadedBy", "Uploaded by field cannot be empty"),
            FieldError::new("country", "Country is required"),
        ]));
        let body = body_json(err, false);
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0]["field"], "uploadedBy");
        assert_eq!(body["errors"][1]["message"], "Country is required");
        assert!(body.get("message").is_none());
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_external_store_body() {
        let body = body_json(
            AppError::external_store("No parent record found for this submission"),
            true,
        );
        assert_eq!(body["message"], "No parent record found for this submission");
        assert_eq!(body["code"], "EXTERNAL_STORE_ERROR");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_cms_error_becomes_external_store() {
        let err = HttpAppError::from(CmsError::Rejected {
            status: 409,
            message: "Duplicate entry".to_string(),
        });
        assert_eq!(err.0.http_status_code(), 400);
        let body = serde_json::to_value(err.body(false)).unwrap();
        assert_eq!(body["message"], "Duplicate entry");
        assert!(body["error"].as_str().unwrap().contains("409"));
    }

    #[test]
    fn test_internal_detail_hidden_in_production() {
        let err = AppError::Internal("connection reset".to_string());
        let body = body_json(err, false);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], "connection reset");

        let err = AppError::Internal("connection reset".to_string());
        let body = body_json(err, true);
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_status_codes() {
        let response = HttpAppError(AppError::InvalidFormData("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = HttpAppError(AppError::Internal("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
