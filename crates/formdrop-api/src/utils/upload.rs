//! Multipart form adapter for submissions
//!
//! Turns a `multipart/form-data` body into the loosely-typed object the validator
//! checks. No validation happens here: missing or odd fields are passed through as-is.

use axum::extract::Multipart;
use axum::http::{header, HeaderMap};
use formdrop_core::submission::{
    raw_attachment, ATTACHMENTS, COUNTRY, EMAIL, UPLOADED_BY,
};
use formdrop_core::{AppError, RawValue, SubmissionSchema};

/// Transfer encoding recorded for every attachment.
pub const ATTACHMENT_ENCODING: &str = "7bit";

/// Content type recorded when a file part carries none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    let normalized = content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase();

    if normalized.is_empty() {
        DEFAULT_CONTENT_TYPE.to_string()
    } else {
        normalized
    }
}

/// Bearer token from an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

fn is_text_field(name: &str, schema: &SubmissionSchema) -> bool {
    matches!(name, UPLOADED_BY | COUNTRY | EMAIL) || schema.accepts(name)
}

/// Read every part of the form into a raw submission object.
///
/// Text fields keep their first occurrence. Every part named `attachments` becomes an
/// attachment object, in form order. Unknown parts are drained and ignored.
pub async fn extract_submission(
    mut multipart: Multipart,
    schema: &SubmissionSchema,
) -> Result<RawValue, AppError> {
    let mut raw = RawValue::object();
    let mut attachments = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidFormData(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if name == ATTACHMENTS {
            let original_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field
                .content_type()
                .map(normalize_mime_type)
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

            let data = field.bytes().await.map_err(|e| {
                AppError::InvalidFormData(format!("Failed to read file data: {}", e))
            })?;

            tracing::debug!(
                original_name = %original_name,
                content_type = %content_type,
                size = data.len(),
                "Received attachment part"
            );
            attachments.push(raw_attachment(
                original_name,
                ATTACHMENT_ENCODING,
                content_type,
                data,
            ));
        } else if is_text_field(&name, schema) {
            let value = field.text().await.map_err(|e| {
                AppError::InvalidFormData(format!("Failed to read field '{}': {}", name, e))
            })?;
            if raw.get(&name).is_none() {
                raw.insert(name, value);
            }
        } else {
            // Drain unknown parts so the stream can advance.
            field.bytes().await.map_err(|e| {
                AppError::InvalidFormData(format!("Failed to read field '{}': {}", name, e))
            })?;
        }
    }

    if !attachments.is_empty() {
        raw.insert(ATTACHMENTS, attachments);
    }

    Ok(raw)
}
