use std::sync::Arc;

use axum::{extract::State, Json};
use formdrop_core::CountryOption;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CountriesResponse {
    pub success: bool,
    pub data: Vec<CountryOption>,
}

/// List country options
///
/// Every accepted alpha-3 code with its display name, for populating a country picker.
#[utoipa::path(
    get,
    path = "/api/countries",
    tag = "submissions",
    responses(
        (status = 200, description = "Country options", body = CountriesResponse)
    )
)]
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Json<CountriesResponse> {
    Json(CountriesResponse {
        success: true,
        data: state.validator.countries().list_options(),
    })
}
