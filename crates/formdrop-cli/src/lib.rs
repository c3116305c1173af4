//! Helpers for the `formdrop` command-line tool.

use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use formdrop_core::submission::{raw_attachment, ATTACHMENTS, CAPTION, COUNTRY, EMAIL, UPLOADED_BY};
use formdrop_core::{
    CountryOption, FieldError, ImageMimeType, RawValue, Submission, ValidationErrors,
};
use serde::Serialize;

/// Content type used when a file extension is not a known image type.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Content type the HTTP adapter would see for a file with this name.
pub fn guess_content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageMimeType::from_extension)
        .map(|mime| mime.as_str())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// Read a local file into the same attachment object a multipart upload produces.
pub fn read_attachment(path: &Path) -> anyhow::Result<RawValue> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(
        path = %path.display(),
        size = data.len(),
        "Read attachment"
    );
    Ok(raw_attachment(
        original_name,
        "7bit",
        guess_content_type(path),
        Bytes::from(data),
    ))
}

/// Assemble a raw submission object from command-line values.
pub fn build_submission(
    uploaded_by: &str,
    country: &str,
    email: &str,
    caption: Option<&str>,
    attachments: Vec<RawValue>,
) -> RawValue {
    let mut raw = RawValue::object()
        .with(UPLOADED_BY, uploaded_by)
        .with(COUNTRY, country)
        .with(EMAIL, email);
    if let Some(caption) = caption {
        raw.insert(CAPTION, caption);
    }
    if !attachments.is_empty() {
        raw.insert(ATTACHMENTS, attachments);
    }
    raw
}

/// JSON printed by `formdrop check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<Submission>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl From<Result<Submission, ValidationErrors>> for CheckReport {
    fn from(result: Result<Submission, ValidationErrors>) -> Self {
        match result {
            Ok(submission) => CheckReport {
                success: true,
                submission: Some(submission),
                errors: Vec::new(),
            },
            Err(errors) => CheckReport {
                success: false,
                submission: None,
                errors: errors.into_errors(),
            },
        }
    }
}

/// Two-column text table of country options.
pub fn format_country_table(options: &[CountryOption]) -> String {
    let mut out = format!("{:<6} {}\n", "CODE", "NAME");
    for option in options {
        out.push_str(&format!(
            "{:<6} {}\n",
            option.code,
            truncate_string(&option.label, 48)
        ));
    }
    out
}
