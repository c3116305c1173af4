//! Validated submission types and field-level errors

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

use super::CAPTION;

/// Image types accepted as attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ImageMimeType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "image/webp")]
    Webp,
    #[serde(rename = "image/svg+xml")]
    Svg,
}

impl ImageMimeType {
    pub const ALL: [ImageMimeType; 5] = [
        ImageMimeType::Jpeg,
        ImageMimeType::Png,
        ImageMimeType::Gif,
        ImageMimeType::Webp,
        ImageMimeType::Svg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Gif => "image/gif",
            ImageMimeType::Webp => "image/webp",
            ImageMimeType::Svg => "image/svg+xml",
        }
    }

    /// Exact match against the allowed set.
    pub fn parse(mime_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == mime_type)
    }

    /// Content type for a file extension, used by adapters that only know a path.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMimeType::Jpeg),
            "png" => Some(ImageMimeType::Png),
            "gif" => Some(ImageMimeType::Gif),
            "webp" => Some(ImageMimeType::Webp),
            "svg" => Some(ImageMimeType::Svg),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted file. The byte buffer is not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub field_name: String,
    pub original_name: String,
    pub encoding: String,
    pub mime_type: ImageMimeType,
    #[serde(skip)]
    pub data: Bytes,
    pub size: u64,
}

/// A submission that passed every rule, with canonical field shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub uploaded_by: String,
    /// Uppercase ISO 3166-1 alpha-3 code
    pub country: String,
    pub email: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub optional_fields: BTreeMap<String, String>,
    pub attachments: Vec<Attachment>,
}

impl Submission {
    pub fn caption(&self) -> Option<&str> {
        self.optional_field(CAPTION)
    }

    pub fn optional_field(&self, name: &str) -> Option<&str> {
        self.optional_fields.get(name).map(String::as_str)
    }

    pub fn total_bytes(&self) -> u64 {
        self.attachments.iter().map(|a| a.size).sum()
    }
}

/// A single rule violation. `field` is a dotted path such as `attachments.0.size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "country")]
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered list of every violated rule for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{} validation error(s): {}", self.0.len(), summary)
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Messages recorded for one dotted path.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_parse_is_exact() {
        assert_eq!(ImageMimeType::parse("image/png"), Some(ImageMimeType::Png));
        assert_eq!(ImageMimeType::parse("image/svg+xml"), Some(ImageMimeType::Svg));
        assert_eq!(ImageMimeType::parse("IMAGE/PNG"), None);
        assert_eq!(ImageMimeType::parse("application/pdf"), None);
    }

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(ImageMimeType::from_extension("JPG"), Some(ImageMimeType::Jpeg));
        assert_eq!(ImageMimeType::from_extension("svg"), Some(ImageMimeType::Svg));
        assert_eq!(ImageMimeType::from_extension("pdf"), None);
    }

    #[test]
    fn test_validation_errors_display_lists_fields() {
        let errors = ValidationErrors(vec![
            FieldError::new("uploadedBy", "Uploaded by field cannot be empty"),
            FieldError::new("country", "bad"),
        ]);
        let text = errors.to_string();
        assert!(text.starts_with("2 validation error(s)"));
        assert!(text.contains("uploadedBy: Uploaded by field cannot be empty"));
        assert_eq!(errors.messages_for("country"), vec!["bad"]);
    }
}
