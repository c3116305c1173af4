//! HTTP content store client

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use formdrop_core::CmsConfig;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::traits::{
    CmsError, CmsResult, ContentStore, ParentFilter, Transaction, TransactionReceipt,
    UploadRequest, UploadTarget,
};

#[derive(Debug, Deserialize)]
struct ParentLookup {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    message: String,
}

/// Content store reached over a JSON HTTP API.
#[derive(Clone, Debug)]
pub struct HttpContentStore {
    client: Client,
    base_url: String,
    default_token: Option<String>,
}

impl HttpContentStore {
    pub fn new(
        base_url: impl Into<String>,
        default_token: Option<String>,
        timeout: Duration,
    ) -> CmsResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CmsError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_token,
        })
    }

    pub fn from_config(config: &CmsConfig) -> CmsResult<Self> {
        Self::new(
            config.base_url.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request-scoped token wins over the configured default.
    fn resolve_token<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        token.or(self.default_token.as_deref())
    }

    fn apply_auth(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match self.resolve_token(token) {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Whether `url` is served by the same scheme, host and port as the store API.
    fn shares_origin(&self, url: &str) -> bool {
        match (Url::parse(&self.base_url), Url::parse(url)) {
            (Ok(base), Ok(other)) => base.origin() == other.origin(),
            _ => false,
        }
    }

    async fn send(&self, request: RequestBuilder, token: Option<&str>) -> CmsResult<Response> {
        self.dispatch(self.apply_auth(request, token)).await
    }

    async fn dispatch(&self, request: RequestBuilder) -> CmsResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| CmsError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<RejectionBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    text
                }
            });

        Err(CmsError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> CmsResult<T> {
        self.send(request, token)
            .await?
            .json()
            .await
            .map_err(|e| CmsError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn find_parent(
        &self,
        filter: &ParentFilter,
        token: Option<&str>,
    ) -> CmsResult<Option<String>> {
        let request = self.client.get(self.build_url("/query/parent")).query(&[
            ("uploadedBy", filter.uploaded_by.as_str()),
            ("email", filter.email.as_str()),
        ]);

        match self.send_json::<ParentLookup>(request, token).await {
            Ok(lookup) => Ok(lookup.id.filter(|id| !id.is_empty())),
            Err(CmsError::Rejected { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn request_upload_target(
        &self,
        request: &UploadRequest,
        token: Option<&str>,
    ) -> CmsResult<UploadTarget> {
        let builder = self.client.post(self.build_url("/uploads")).json(request);
        self.send_json(builder, token).await
    }

    async fn transfer(
        &self,
        target: &UploadTarget,
        content_type: &str,
        data: Bytes,
        token: Option<&str>,
    ) -> CmsResult<()> {
        let request = self
            .client
            .put(&target.upload_url)
            .header("Content-Type", content_type)
            .body(data);

        // Upload URLs may point at another host (e.g. presigned object storage).
        // Store credentials only go to the store's own origin.
        let request = if self.shares_origin(&target.upload_url) {
            self.apply_auth(request, token)
        } else {
            request
        };
        self.dispatch(request).await?;
        tracing::debug!(upload_url = %target.upload_url, "File transferred to content store");
        Ok(())
    }

    async fn commit_transaction(
        &self,
        transaction: &Transaction,
        token: Option<&str>,
    ) -> CmsResult<TransactionReceipt> {
        let request = self
            .client
            .post(self.build_url("/transactions"))
            .json(transaction);
        self.send_json(request, token).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ImageReference, SubmissionRecord};
    use mockito::Matcher;

    fn store(url: &str, default_token: Option<&str>) -> HttpContentStore {
        HttpContentStore::new(url, default_token.map(String::from), Duration::from_secs(5))
            .unwrap()
    }

    fn filter() -> ParentFilter {
        ParentFilter {
            uploaded_by: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_parent_uses_request_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/query/parent")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("uploadedBy".into(), "John Doe".into()),
                Matcher::UrlEncoded("email".into(), "john@example.com".into()),
            ]))
            .match_header("authorization", "Bearer request-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"parent-1"}"#)
            .create_async()
            .await;

        let store = store(&server.url(), Some("default-token"));
        let parent = store
            .find_parent(&filter(), Some("request-token"))
            .await
            .unwrap();

        assert_eq!(parent.as_deref(), Some("parent-1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_parent_falls_back_to_default_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/query/parent")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer default-token")
            .with_status(200)
            .with_body(r#"{"id":null}"#)
            .create_async()
            .await;

        let store = store(&server.url(), Some("default-token"));
        let parent = store.find_parent(&filter(), None).await.unwrap();

        assert_eq!(parent, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_token_sends_no_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/query/parent")
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(404)
            .create_async()
            .await;

        let store = store(&server.url(), None);
        assert_eq!(store.find_parent(&filter(), None).await.unwrap(), None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_target_and_transfer() {
        let mut server = mockito::Server::new_async().await;
        let upload_url = format!("{}/blobs/abc", server.url());
        let target_mock = server
            .mock("POST", "/uploads")
            .match_body(Matcher::Json(serde_json::json!({
                "filename": "photo.png",
                "contentType": "image/png",
                "size": 4
            })))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "uploadUrl": upload_url,
                    "fileUrl": "https://cdn.example.com/photo.png"
                })
                .to_string(),
            )
            .create_async()
            .await;
        let put_mock = server
            .mock("PUT", "/blobs/abc")
            .match_header("content-type", "image/png")
            .match_body("data")
            .with_status(200)
            .create_async()
            .await;

        let store = store(&server.url(), None);
        let request = UploadRequest {
            filename: "photo.png".to_string(),
            content_type: "image/png".to_string(),
            size: 4,
        };
        let target = store.request_upload_target(&request, None).await.unwrap();
        assert_eq!(target.file_url, "https://cdn.example.com/photo.png");

        store
            .transfer(&target, "image/png", Bytes::from_static(b"data"), None)
            .await
            .unwrap();

        target_mock.assert_async().await;
        put_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transfer_to_same_origin_carries_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/blobs/abc")
            .match_header("authorization", "Bearer secret-cms-token")
            .with_status(200)
            .create_async()
            .await;

        let store = store(&server.url(), Some("secret-cms-token"));
        let target = UploadTarget {
            upload_url: format!("{}/blobs/abc", server.url()),
            file_url: "https://cdn.example.com/a.jpg".to_string(),
        };
        store
            .transfer(&target, "image/jpeg", Bytes::from_static(b"data"), None)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transfer_to_foreign_host_omits_token() {
        let api = mockito::Server::new_async().await;
        let mut blobs = mockito::Server::new_async().await;
        let mock = blobs
            .mock("PUT", "/signed")
            .match_query(Matcher::UrlEncoded(
                "X-Amz-Signature".into(),
                "abc".into(),
            ))
            .match_header("authorization", Matcher::Missing)
            .match_header("content-type", "image/jpeg")
            .with_status(200)
            .create_async()
            .await;

        let store = store(&api.url(), Some("secret-cms-token"));
        let target = UploadTarget {
            upload_url: format!("{}/signed?X-Amz-Signature=abc", blobs.url()),
            file_url: "https://cdn.example.com/a.jpg".to_string(),
        };
        store
            .transfer(
                &target,
                "image/jpeg",
                Bytes::from_static(b"data"),
                Some("request-token"),
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_shares_origin() {
        let store = store("http://127.0.0.1:8080/api", None);
        assert!(store.shares_origin("http://127.0.0.1:8080/blobs/1"));
        assert!(!store.shares_origin("http://127.0.0.1:9090/blobs/1"));
        assert!(!store.shares_origin("https://127.0.0.1:8080/blobs/1"));
        assert!(!store.shares_origin("https://bucket.s3.amazonaws.com/k"));
        assert!(!store.shares_origin("not a url"));
    }

    #[tokio::test]
    async fn test_commit_transaction() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/transactions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "operations": [{ "create": { "parentId": "parent-1" } }]
            })))
            .with_status(200)
            .with_body(r#"{"transactionId":"tx-42"}"#)
            .create_async()
            .await;

        let transaction = Transaction::default().create(SubmissionRecord {
            parent_id: "parent-1".to_string(),
            image: ImageReference {
                url: "https://cdn.example.com/a.jpg".to_string(),
                filename: "a.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            },
            uploaded_by: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            country: "USA".to_string(),
            caption: None,
        });

        let store = store(&server.url(), None);
        let receipt = store.commit_transaction(&transaction, None).await.unwrap();
        assert_eq!(receipt.transaction_id, "tx-42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_message_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/transactions")
            .with_status(422)
            .with_body(r#"{"message":"Document validation failed"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/uploads")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let store = store(&server.url(), None);

        let err = store
            .commit_transaction(&Transaction::default(), None)
            .await
            .unwrap_err();
        match err {
            CmsError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Document validation failed");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let request = UploadRequest {
            filename: "a.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size: 1,
        };
        let err = store.request_upload_target(&request, None).await.unwrap_err();
        assert_eq!(err.store_message(), "upstream exploded");
    }

    #[tokio::test]
    async fn test_malformed_response_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/transactions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let store = store(&server.url(), None);
        let err = store
            .commit_transaction(&Transaction::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CmsError::Decode(_)));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let store = store("https://cms.example.com/", None);
        assert_eq!(store.base_url(), "https://cms.example.com");
        assert_eq!(store.build_url("/uploads"), "https://cms.example.com/uploads");
    }
}
