//! Which optional text fields a submission form accepts
//!
//! The core field set (uploadedBy, country, email, attachments) is fixed. Forms may add
//! optional text fields on top; each one, when present, must be non-empty text.

use super::CAPTION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalField {
    /// Key in the raw input and in `Submission::optional_fields`
    pub name: String,
    /// Human-readable label used in error messages ("Caption cannot be empty")
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionSchema {
    optional_fields: Vec<OptionalField>,
}

impl SubmissionSchema {
    /// Core fields only. Unknown keys, including `caption`, are ignored.
    pub fn core() -> Self {
        Self::default()
    }

    /// Core fields plus an optional, non-empty `caption`.
    pub fn with_caption() -> Self {
        Self::core().with_optional_field(CAPTION, "Caption")
    }

    pub fn with_optional_field(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        if !self.accepts(&name) {
            self.optional_fields.push(OptionalField {
                name,
                label: label.into(),
            });
        }
        self
    }

    pub fn optional_fields(&self) -> &[OptionalField] {
        &self.optional_fields
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.optional_fields.iter().any(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_schema_has_no_optional_fields() {
        assert!(SubmissionSchema::core().optional_fields().is_empty());
        assert!(!SubmissionSchema::core().accepts("caption"));
    }

    #[test]
    fn test_with_caption() {
        let schema = SubmissionSchema::with_caption();
        assert!(schema.accepts("caption"));
        assert_eq!(schema.optional_fields()[0].label, "Caption");
    }

    #[test]
    fn test_duplicate_optional_field_is_ignored() {
        let schema = SubmissionSchema::with_caption().with_optional_field("caption", "Other");
        assert_eq!(schema.optional_fields().len(), 1);
        assert_eq!(schema.optional_fields()[0].label, "Caption");
    }
}
