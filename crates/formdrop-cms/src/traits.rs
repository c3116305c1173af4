//! Content store abstraction trait
//!
//! This module defines the ContentStore trait that all content store clients must
//! implement, together with the request and response types exchanged with it.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content store operation errors
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Content store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CmsError {
    /// Message suitable for showing to the submitter.
    pub fn store_message(&self) -> &str {
        match self {
            CmsError::Rejected { message, .. } => message,
            CmsError::Request(msg) | CmsError::Decode(msg) | CmsError::Config(msg) => msg,
        }
    }
}

/// Result type for content store operations
pub type CmsResult<T> = Result<T, CmsError>;

/// Identifies the parent record a submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentFilter {
    pub uploaded_by: String,
    pub email: String,
}

/// Body of an upload target request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub filename: String,
    pub content_type: String,
    pub size: u64,
}

/// Where to send the bytes of one file, and where it is served from afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    pub url: String,
    pub filename: String,
    pub content_type: String,
}

/// One stored submission entry, created per uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub parent_id: String,
    pub image: ImageReference,
    pub uploaded_by: String,
    pub email: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionOperation {
    Create(SubmissionRecord),
}

/// A batch of operations applied atomically by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub operations: Vec<TransactionOperation>,
}

impl Transaction {
    pub fn create(mut self, record: SubmissionRecord) -> Self {
        self.operations.push(TransactionOperation::Create(record));
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_id: String,
}

/// Content store abstraction trait
///
/// Every method takes the bearer token resolved for the current request. `None` lets the
/// implementation fall back to its own configured credential, if it has one.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Find the id of the parent record matching `filter`, if one exists
    async fn find_parent(&self, filter: &ParentFilter, token: Option<&str>)
        -> CmsResult<Option<String>>;

    /// Ask the store where to upload one file
    async fn request_upload_target(
        &self,
        request: &UploadRequest,
        token: Option<&str>,
    ) -> CmsResult<UploadTarget>;

    /// Send file bytes to a previously issued upload target
    async fn transfer(
        &self,
        target: &UploadTarget,
        content_type: &str,
        data: Bytes,
        token: Option<&str>,
    ) -> CmsResult<()>;

    /// Apply all operations of `transaction` at once
    async fn commit_transaction(
        &self,
        transaction: &Transaction,
        token: Option<&str>,
    ) -> CmsResult<TransactionReceipt>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
