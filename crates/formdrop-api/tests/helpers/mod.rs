//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p formdrop-api`.

pub mod store;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use formdrop_api::setup::routes;
use formdrop_api::AppState;
use formdrop_cms::ContentStore;
use formdrop_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

pub use store::FakeContentStore;

pub const MIB: usize = 1024 * 1024;

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config should load")
}

fn server_for(config: Config, store: Option<Arc<dyn ContentStore>>) -> TestServer {
    let state = Arc::new(AppState::new(config.clone(), store));
    let router = routes::setup_routes(&config, state).expect("router should build");
    TestServer::new(router).expect("test server should start")
}

/// Server without a content store.
pub fn validate_only_server() -> TestServer {
    server_for(test_config(&[]), None)
}

pub fn validate_only_server_with(vars: &[(&str, &str)]) -> TestServer {
    server_for(test_config(vars), None)
}

/// Server forwarding to `store`.
pub fn forwarding_server(store: Arc<FakeContentStore>) -> TestServer {
    server_for(test_config(&[]), Some(store as Arc<dyn ContentStore>))
}

pub fn image_part(filename: &str, mime_type: &str, size: usize) -> Part {
    Part::bytes(vec![0xAB; size])
        .file_name(filename)
        .mime_type(mime_type)
}

pub fn jpeg_part(filename: &str) -> Part {
    image_part(filename, "image/jpeg", 1024)
}

pub fn form(uploaded_by: &str, country: &str, email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("uploadedBy", uploaded_by.to_string())
        .add_text("country", country.to_string())
        .add_text("email", email.to_string())
}

/// A submission that passes every rule, with one JPEG attachment.
pub fn valid_form() -> MultipartForm {
    form("John Doe", "usa", "john@example.com").add_part("attachments", jpeg_part("test.jpg"))
}

/// Messages reported for `field` in a 400 validation body.
pub fn messages_for(body: &serde_json::Value, field: &str) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter(|e| e["field"] == field)
        .filter_map(|e| e["message"].as_str().map(String::from))
        .collect()
}
