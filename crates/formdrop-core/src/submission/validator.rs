//! Submission validator
//!
//! Every rule is evaluated independently and appends to one error list. A submission is
//! either accepted whole or rejected with all of its violations, never the first one only.

use std::collections::BTreeMap;

use validator::ValidateEmail;

use super::model::{Attachment, FieldError, ImageMimeType, Submission, ValidationErrors};
use super::raw::{RawObject, RawValue};
use super::schema::SubmissionSchema;
use super::{
    ATTACHMENTS, ATTACHMENT_FIELD_NAME, BYTE_BUFFER, COUNTRY, EMAIL, ENCODING, FIELD_NAME,
    MAX_ATTACHMENTS, MAX_FILE_SIZE, MAX_UPLOADED_BY_CHARS, MIME_TYPE, MIN_ATTACHMENTS,
    ORIGINAL_NAME, SIZE, UPLOADED_BY,
};
use crate::countries::CountryTable;

const MSG_NOT_OBJECT: &str = "Expected an object";
const MSG_UPLOADED_BY_EMPTY: &str = "Uploaded by field cannot be empty";
const MSG_UPLOADED_BY_TOO_LONG: &str = "Uploaded by field must be at most 20 characters long";
const MSG_UPLOADED_BY_BLANK: &str = "Uploaded by field cannot be empty or contain only whitespace";
const MSG_INVALID_COUNTRY: &str = "Invalid country code. Please use a valid ISO 3166-1 alpha-3 country code (e.g., USA, GBR, FRA)";
const MSG_INVALID_EMAIL: &str = "Invalid email address";
const MSG_ATTACHMENTS_REQUIRED: &str = "At least one attachment is required";
const MSG_ATTACHMENTS_NOT_LIST: &str = "Attachments must be a list";
const MSG_TOO_MANY_ATTACHMENTS: &str = "Maximum of 5 attachments allowed";
const MSG_ATTACHMENT_NOT_OBJECT: &str = "Attachment must be an object";
const MSG_INVALID_FIELD_NAME: &str = "Invalid literal value, expected \"attachments\"";
const MSG_INVALID_FILE_TYPE: &str =
    "Invalid file type. Only JPEG, PNG, GIF, WebP, and SVG files are allowed";
const MSG_NOT_BINARY: &str = "File content must be binary data";
const MSG_SIZE_NOT_NUMBER: &str = "File size must be a number";
const MSG_SIZE_NOT_WHOLE: &str = "File size must be a non-negative whole number";
const MSG_FILE_TOO_LARGE: &str = "File size must be less than 5MB";

/// Validates raw submissions against a [`SubmissionSchema`].
///
/// Holds no mutable state; one instance is shared across all requests.
#[derive(Debug, Clone)]
pub struct SubmissionValidator {
    countries: &'static CountryTable,
    schema: SubmissionSchema,
}

impl Default for SubmissionValidator {
    fn default() -> Self {
        Self::new(CountryTable::global(), SubmissionSchema::with_caption())
    }
}

impl SubmissionValidator {
    pub fn new(countries: &'static CountryTable, schema: SubmissionSchema) -> Self {
        Self { countries, schema }
    }

    pub fn schema(&self) -> &SubmissionSchema {
        &self.schema
    }

    pub fn countries(&self) -> &'static CountryTable {
        self.countries
    }

    pub fn validate(&self, raw: &RawValue) -> Result<Submission, ValidationErrors> {
        let RawValue::Object(fields) = raw else {
            return Err(ValidationErrors(vec![FieldError::new("", MSG_NOT_OBJECT)]));
        };

        let mut errors = Vec::new();

        let uploaded_by = check_uploaded_by(fields.get(UPLOADED_BY), &mut errors);
        let country = self.check_country(fields.get(COUNTRY), &mut errors);
        let email = check_email(fields.get(EMAIL), &mut errors);
        let optional_fields = self.check_optional_fields(fields, &mut errors);
        let attachments = check_attachments(fields.get(ATTACHMENTS), &mut errors);

        match (uploaded_by, country, email, attachments) {
            (Some(uploaded_by), Some(country), Some(email), Some(attachments))
                if errors.is_empty() =>
            {
                Ok(Submission {
                    uploaded_by,
                    country,
                    email,
                    optional_fields,
                    attachments,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }

    fn check_country(&self, value: Option<&RawValue>, errors: &mut Vec<FieldError>) -> Option<String> {
        let code = required_text(value, COUNTRY, "Country", errors)?.to_uppercase();
        if !self.countries.is_valid_alpha3(&code) {
            errors.push(FieldError::new(COUNTRY, MSG_INVALID_COUNTRY));
            return None;
        }
        Some(code)
    }

    fn check_optional_fields(
        &self,
        fields: &RawObject,
        errors: &mut Vec<FieldError>,
    ) -> BTreeMap<String, String> {
        let mut accepted = BTreeMap::new();
        for field in self.schema.optional_fields() {
            let value = match fields.get(&field.name) {
                None | Some(RawValue::Null) => continue,
                Some(value) => value,
            };
            match value.as_text() {
                Some("") => errors.push(FieldError::new(
                    &field.name,
                    format!("{} cannot be empty", field.label),
                )),
                Some(text) => {
                    accepted.insert(field.name.clone(), text.to_string());
                }
                None => errors.push(FieldError::new(
                    &field.name,
                    format!("{} must be text", field.label),
                )),
            }
        }
        accepted
    }
}

/// Present, non-null text, or an error entry for `field`.
fn required_text<'a>(
    value: Option<&'a RawValue>,
    field: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value {
        None | Some(RawValue::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", label)));
            None
        }
        Some(RawValue::Text(text)) => Some(text),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be text", label)));
            None
        }
    }
}

fn check_uploaded_by(value: Option<&RawValue>, errors: &mut Vec<FieldError>) -> Option<String> {
    let name = required_text(value, UPLOADED_BY, "Uploaded by field", errors)?;
    let before = errors.len();

    if name.is_empty() {
        errors.push(FieldError::new(UPLOADED_BY, MSG_UPLOADED_BY_EMPTY));
    }
    if name.chars().count() > MAX_UPLOADED_BY_CHARS {
        errors.push(FieldError::new(UPLOADED_BY, MSG_UPLOADED_BY_TOO_LONG));
    }
    if name.trim().is_empty() {
        errors.push(FieldError::new(UPLOADED_BY, MSG_UPLOADED_BY_BLANK));
    }

    (errors.len() == before).then(|| name.to_string())
}

fn check_email(value: Option<&RawValue>, errors: &mut Vec<FieldError>) -> Option<String> {
    let email = required_text(value, EMAIL, "Email", errors)?.to_string();
    if !email.validate_email() {
        errors.push(FieldError::new(EMAIL, MSG_INVALID_EMAIL));
        return None;
    }
    Some(email)
}

fn check_attachments(
    value: Option<&RawValue>,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<Attachment>> {
    let items = match value {
        None | Some(RawValue::Null) => {
            errors.push(FieldError::new(ATTACHMENTS, MSG_ATTACHMENTS_REQUIRED));
            return None;
        }
        Some(RawValue::List(items)) => items,
        Some(_) => {
            errors.push(FieldError::new(ATTACHMENTS, MSG_ATTACHMENTS_NOT_LIST));
            return None;
        }
    };

    let before = errors.len();
    if items.len() < MIN_ATTACHMENTS {
        errors.push(FieldError::new(ATTACHMENTS, MSG_ATTACHMENTS_REQUIRED));
    }
    if items.len() > MAX_ATTACHMENTS {
        errors.push(FieldError::new(ATTACHMENTS, MSG_TOO_MANY_ATTACHMENTS));
    }

    // Elements are checked even when the count is already out of bounds.
    let attachments: Vec<Attachment> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| check_attachment(index, item, errors))
        .collect();

    (errors.len() == before).then_some(attachments)
}

fn check_attachment(index: usize, item: &RawValue, errors: &mut Vec<FieldError>) -> Option<Attachment> {
    let path = |key: &str| format!("{}.{}.{}", ATTACHMENTS, index, key);

    let RawValue::Object(fields) = item else {
        errors.push(FieldError::new(
            format!("{}.{}", ATTACHMENTS, index),
            MSG_ATTACHMENT_NOT_OBJECT,
        ));
        return None;
    };
    let before = errors.len();

    let field_name = match fields.get(FIELD_NAME).and_then(RawValue::as_text) {
        Some(name) if name == ATTACHMENT_FIELD_NAME => Some(name.to_string()),
        _ => {
            errors.push(FieldError::new(path(FIELD_NAME), MSG_INVALID_FIELD_NAME));
            None
        }
    };

    let original_name =
        required_text(fields.get(ORIGINAL_NAME), &path(ORIGINAL_NAME), "Original name", errors)
            .map(str::to_string);
    let encoding = required_text(fields.get(ENCODING), &path(ENCODING), "Encoding", errors)
        .map(str::to_string);

    let mime_type = match fields
        .get(MIME_TYPE)
        .and_then(RawValue::as_text)
        .and_then(ImageMimeType::parse)
    {
        Some(mime) => Some(mime),
        None => {
            errors.push(FieldError::new(path(MIME_TYPE), MSG_INVALID_FILE_TYPE));
            None
        }
    };

    let data = match fields.get(BYTE_BUFFER) {
        Some(RawValue::Binary(bytes)) => Some(bytes.clone()),
        _ => {
            errors.push(FieldError::new(path(BYTE_BUFFER), MSG_NOT_BINARY));
            None
        }
    };

    let size = check_size(fields.get(SIZE), &path(SIZE), errors);

    match (field_name, original_name, encoding, mime_type, data, size) {
        (
            Some(field_name),
            Some(original_name),
            Some(encoding),
            Some(mime_type),
            Some(data),
            Some(size),
        ) if errors.len() == before => Some(Attachment {
            field_name,
            original_name,
            encoding,
            mime_type,
            data,
            size,
        }),
        _ => None,
    }
}

fn check_size(value: Option<&RawValue>, field: &str, errors: &mut Vec<FieldError>) -> Option<u64> {
    let Some(RawValue::Number(size)) = value else {
        errors.push(FieldError::new(field, MSG_SIZE_NOT_NUMBER));
        return None;
    };
    let size = *size;
    let before = errors.len();

    if !size.is_finite() || size < 0.0 || size.fract() != 0.0 {
        errors.push(FieldError::new(field, MSG_SIZE_NOT_WHOLE));
    }
    if size > MAX_FILE_SIZE as f64 {
        errors.push(FieldError::new(field, MSG_FILE_TOO_LARGE));
    }

    (errors.len() == before).then_some(size as u64)
}
