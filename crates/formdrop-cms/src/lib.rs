//! Formdrop content store client
//!
//! This crate defines the [`ContentStore`] abstraction accepted submissions are forwarded
//! to, and an HTTP implementation of it.
//!
//! # Forwarding protocol
//!
//! One submission is forwarded in three steps:
//!
//! 1. look up the parent record matching the submitter (`find_parent`)
//! 2. for each attachment, request an upload target and transfer the bytes to it
//! 3. commit a single transaction with one create operation per uploaded file

pub mod factory;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use factory::create_content_store;
pub use http::HttpContentStore;
pub use traits::{
    CmsError, CmsResult, ContentStore, ImageReference, ParentFilter, SubmissionRecord,
    Transaction, TransactionOperation, TransactionReceipt, UploadRequest, UploadTarget,
};
