//! Submission forwarding service
//!
//! Forwards an accepted submission to the content store:
//! find parent → upload attachments concurrently → commit one transaction.

use std::sync::Arc;

use formdrop_cms::{
    CmsError, ContentStore, ImageReference, ParentFilter, SubmissionRecord, Transaction,
    UploadRequest,
};
use formdrop_core::{AppError, Attachment, Submission};
use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

pub const NO_PARENT_MESSAGE: &str = "No parent record found for this submission";
pub const NO_UPLOADS_MESSAGE: &str = "Failed to upload any attachments";

/// One attachment that reached the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub filename: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

/// Result of a forwarded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForwardReceipt {
    pub parent_id: String,
    pub transaction_id: String,
    pub uploaded: Vec<UploadedFile>,
    /// Attachments that could not be uploaded and were left out of the transaction
    pub failed_uploads: usize,
}

pub struct SubmissionService {
    store: Arc<dyn ContentStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(
        skip(self, submission, token),
        fields(
            store = self.store.name(),
            attachments = submission.attachments.len(),
            has_token = token.is_some()
        )
    )]
    pub async fn forward(
        &self,
        submission: &Submission,
        token: Option<&str>,
    ) -> Result<ForwardReceipt, AppError> {
        let filter = ParentFilter {
            uploaded_by: submission.uploaded_by.clone(),
            email: submission.email.clone(),
        };
        let parent_id = self
            .store
            .find_parent(&filter, token)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AppError::external_store(NO_PARENT_MESSAGE))?;

        let results = join_all(
            submission
                .attachments
                .iter()
                .map(|attachment| self.upload_attachment(attachment, token)),
        )
        .await;

        let mut uploaded = Vec::with_capacity(results.len());
        let mut failed_uploads = 0;
        for (attachment, result) in submission.attachments.iter().zip(results) {
            match result {
                Ok(file) => uploaded.push(file),
                Err(e) => {
                    failed_uploads += 1;
                    tracing::warn!(
                        error = %e,
                        filename = %attachment.original_name,
                        "Attachment upload failed"
                    );
                }
            }
        }

        if uploaded.is_empty() {
            return Err(AppError::external_store(NO_UPLOADS_MESSAGE));
        }

        let transaction = uploaded
            .iter()
            .fold(Transaction::default(), |transaction, file| {
                transaction.create(record_for(submission, &parent_id, file))
            });

        let receipt = self
            .store
            .commit_transaction(&transaction, token)
            .await
            .map_err(store_error)?;

        tracing::info!(
            parent_id = %parent_id,
            transaction_id = %receipt.transaction_id,
            uploaded = uploaded.len(),
            failed_uploads,
            "Submission forwarded"
        );

        Ok(ForwardReceipt {
            parent_id,
            transaction_id: receipt.transaction_id,
            uploaded,
            failed_uploads,
        })
    }

    async fn upload_attachment(
        &self,
        attachment: &Attachment,
        token: Option<&str>,
    ) -> Result<UploadedFile, CmsError> {
        let content_type = attachment.mime_type.as_str();
        let request = UploadRequest {
            filename: attachment.original_name.clone(),
            content_type: content_type.to_string(),
            size: attachment.size,
        };

        let target = self.store.request_upload_target(&request, token).await?;
        self.store
            .transfer(&target, content_type, attachment.data.clone(), token)
            .await?;

        Ok(UploadedFile {
            filename: attachment.original_name.clone(),
            url: target.file_url,
            content_type: content_type.to_string(),
            size: attachment.size,
        })
    }
}

/// Store failures reach the client with the store's own message.
fn store_error(err: CmsError) -> AppError {
    AppError::external_store_with_detail(err.store_message(), err.to_string())
}

fn record_for(submission: &Submission, parent_id: &str, file: &UploadedFile) -> SubmissionRecord {
    SubmissionRecord {
        parent_id: parent_id.to_string(),
        image: ImageReference {
            url: file.url.clone(),
            filename: file.filename.clone(),
            content_type: file.content_type.clone(),
        },
        uploaded_by: submission.uploaded_by.clone(),
        email: submission.email.clone(),
        country: submission.country.clone(),
        caption: submission.caption().map(str::to_string),
    }
}
