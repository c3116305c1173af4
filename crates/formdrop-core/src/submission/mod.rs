//! Submission schema and validation
//!
//! [`SubmissionValidator`] turns a loosely-typed [`RawValue`] into a normalized
//! [`Submission`], or collects every violated rule into [`ValidationErrors`].

pub mod model;
pub mod raw;
pub mod schema;
pub mod validator;

pub use model::{Attachment, FieldError, ImageMimeType, Submission, ValidationErrors};
pub use raw::{RawObject, RawValue};
pub use schema::{OptionalField, SubmissionSchema};
pub use validator::SubmissionValidator;

// Raw input keys
pub const UPLOADED_BY: &str = "uploadedBy";
pub const COUNTRY: &str = "country";
pub const EMAIL: &str = "email";
pub const CAPTION: &str = "caption";
pub const ATTACHMENTS: &str = "attachments";

// Attachment keys
pub const FIELD_NAME: &str = "fieldName";
pub const ORIGINAL_NAME: &str = "originalName";
pub const ENCODING: &str = "encoding";
pub const MIME_TYPE: &str = "mimeType";
pub const BYTE_BUFFER: &str = "byteBuffer";
pub const SIZE: &str = "size";

/// Literal every attachment's `fieldName` must carry.
pub const ATTACHMENT_FIELD_NAME: &str = "attachments";

pub const MAX_UPLOADED_BY_CHARS: usize = 20;
pub const MIN_ATTACHMENTS: usize = 1;
pub const MAX_ATTACHMENTS: usize = 5;
/// 5 MiB
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Build the raw attachment object the validator expects from upload data.
pub fn raw_attachment(
    original_name: impl Into<String>,
    encoding: impl Into<String>,
    mime_type: impl Into<String>,
    data: bytes::Bytes,
) -> RawValue {
    let size = data.len();
    RawValue::object()
        .with(FIELD_NAME, ATTACHMENT_FIELD_NAME)
        .with(ORIGINAL_NAME, original_name.into())
        .with(ENCODING, encoding.into())
        .with(MIME_TYPE, mime_type.into())
        .with(BYTE_BUFFER, data)
        .with(SIZE, size)
}
