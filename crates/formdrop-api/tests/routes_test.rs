//! Reference data, health and documentation routes.

mod helpers;

use helpers::{forwarding_server, validate_only_server, FakeContentStore};
use std::sync::Arc;

#[tokio::test]
async fn test_list_countries() {
    let server = validate_only_server();

    let response = server.get("/api/countries").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    let countries = body["data"].as_array().unwrap();
    assert_eq!(countries.len(), 250);
    assert!(countries
        .iter()
        .any(|c| c["code"] == "USA" && c["label"] == "United States of America"));
}

#[tokio::test]
async fn test_health_reports_mode() {
    let response = validate_only_server().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "validate-only");

    let store = Arc::new(FakeContentStore::with_parent("p"));
    let body: serde_json::Value = forwarding_server(store).get("/health").await.json();
    assert_eq!(body["mode"], "forwarding");
}

#[tokio::test]
async fn test_openapi_document() {
    let response = validate_only_server().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/submit"]["post"].is_object());
}
