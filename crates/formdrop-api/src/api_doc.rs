//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::services;
use crate::setup::routes::health;
use crate::state;

/// Returns the OpenAPI spec for every public route.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Formdrop API",
        version = "0.1.0",
        description = "Form submission endpoint. Validates uploader details and image attachments and optionally forwards accepted submissions to a content store."
    ),
    paths(
        handlers::submit::submit,
        handlers::countries::list_countries,
        health::health_check,
    ),
    components(
        schemas(
            handlers::submit::SubmitResponse,
            handlers::countries::CountriesResponse,
            health::HealthCheckResponse,
            services::ForwardReceipt,
            services::UploadedFile,
            state::ServiceMode,
            error::ErrorResponse,
            formdrop_core::FieldError,
            formdrop_core::CountryOption,
        )
    ),
    tags(
        (name = "submissions", description = "Form submission and reference data"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
