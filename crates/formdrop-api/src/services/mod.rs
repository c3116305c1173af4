pub mod submission;

pub use submission::{ForwardReceipt, SubmissionService, UploadedFile};
