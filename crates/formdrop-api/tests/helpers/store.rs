//! In-memory content store that records every call.

use async_trait::async_trait;
use bytes::Bytes;
use formdrop_cms::{
    CmsError, CmsResult, ContentStore, ParentFilter, Transaction, TransactionReceipt,
    UploadRequest, UploadTarget,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Default)]
pub struct FakeContentStore {
    parent_id: Option<String>,
    parent_rejection: Option<String>,
    upload_barrier: Option<Arc<Barrier>>,
    failing_files: HashSet<String>,
    transaction_rejection: Option<String>,
    pub tokens: Mutex<Vec<Option<String>>>,
    pub transfers: Mutex<Vec<(String, usize)>>,
    pub transactions: Mutex<Vec<Transaction>>,
}

impl FakeContentStore {
    /// Store with a parent record for every lookup.
    pub fn with_parent(parent_id: &str) -> Self {
        Self {
            parent_id: Some(parent_id.to_string()),
            ..Default::default()
        }
    }

    /// Store where no parent record exists.
    pub fn without_parent() -> Self {
        Self::default()
    }

    /// Upload target requests for `filename` fail.
    pub fn failing_upload(mut self, filename: &str) -> Self {
        self.failing_files.insert(filename.to_string());
        self
    }

    /// Parent lookups fail with a 401 carrying `message`.
    pub fn rejecting_parent_lookup(mut self, message: &str) -> Self {
        self.parent_rejection = Some(message.to_string());
        self
    }

    /// Every upload target request waits until `uploads` of them are in flight.
    pub fn synchronized_uploads(mut self, uploads: usize) -> Self {
        self.upload_barrier = Some(Arc::new(Barrier::new(uploads)));
        self
    }

    pub fn rejecting_transactions(mut self, message: &str) -> Self {
        self.transaction_rejection = Some(message.to_string());
        self
    }

    fn record_token(&self, token: Option<&str>) {
        self.tokens.lock().unwrap().push(token.map(String::from));
    }

    pub fn committed(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }

    pub fn seen_tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn find_parent(
        &self,
        _filter: &ParentFilter,
        token: Option<&str>,
    ) -> CmsResult<Option<String>> {
        self.record_token(token);
        if let Some(message) = &self.parent_rejection {
            return Err(CmsError::Rejected {
                status: 401,
                message: message.clone(),
            });
        }
        Ok(self.parent_id.clone())
    }

    async fn request_upload_target(
        &self,
        request: &UploadRequest,
        token: Option<&str>,
    ) -> CmsResult<UploadTarget> {
        self.record_token(token);
        if let Some(barrier) = &self.upload_barrier {
            barrier.wait().await;
        }
        if self.failing_files.contains(&request.filename) {
            return Err(CmsError::Rejected {
                status: 503,
                message: "Upload service unavailable".to_string(),
            });
        }
        Ok(UploadTarget {
            upload_url: format!("memory://uploads/{}", request.filename),
            file_url: format!("https://cdn.example.com/{}", request.filename),
        })
    }

    async fn transfer(
        &self,
        target: &UploadTarget,
        _content_type: &str,
        data: Bytes,
        token: Option<&str>,
    ) -> CmsResult<()> {
        self.record_token(token);
        self.transfers
            .lock()
            .unwrap()
            .push((target.upload_url.clone(), data.len()));
        Ok(())
    }

    async fn commit_transaction(
        &self,
        transaction: &Transaction,
        token: Option<&str>,
    ) -> CmsResult<TransactionReceipt> {
        self.record_token(token);
        if let Some(message) = &self.transaction_rejection {
            return Err(CmsError::Rejected {
                status: 422,
                message: message.clone(),
            });
        }
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(TransactionReceipt {
            transaction_id: "tx-1".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
