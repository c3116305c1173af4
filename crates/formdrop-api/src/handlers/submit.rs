use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use formdrop_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ForwardReceipt, SubmissionService};
use crate::state::AppState;
use crate::utils::upload::{bearer_token, extract_submission};

pub const SUCCESS_MESSAGE: &str = "Submission received successfully";

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    #[schema(example = "Submission received successfully")]
    pub message: String,
    /// Present in forwarding mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ForwardReceipt>,
}

/// Submit a form
///
/// Validates the multipart form and, when a content store is configured, forwards the
/// attachments and submission records to it. All validation errors are reported at once.
#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "submissions",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Text fields uploadedBy, country, email, optional caption; 1-5 files named 'attachments'"),
    params(
        ("Authorization" = Option<String>, Header, description = "Bearer token forwarded to the content store")
    ),
    responses(
        (status = 200, description = "Submission accepted", body = SubmitResponse),
        (status = 400, description = "Validation failed, malformed form, or rejected by the content store", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, multipart), fields(mode = ?state.mode()))]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmitResponse>, HttpAppError> {
    let multipart = multipart?;
    let raw = extract_submission(multipart, state.validator.schema()).await?;

    let submission = state.validator.validate(&raw).map_err(AppError::from)?;
    tracing::debug!(
        country = %submission.country,
        attachments = submission.attachments.len(),
        total_bytes = submission.total_bytes(),
        "Submission passed validation"
    );

    let Some(store) = state.content_store.clone() else {
        return Ok(Json(SubmitResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: None,
        }));
    };

    let token = bearer_token(&headers);
    let receipt = SubmissionService::new(store)
        .forward(&submission, token.as_deref())
        .await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        data: Some(receipt),
    }))
}
