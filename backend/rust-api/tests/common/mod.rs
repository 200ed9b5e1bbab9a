#![allow(dead_code)]

use aptitude_api::{
    config::Config, create_router, services::catalog::Catalog, services::AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SMALL_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/small_catalog.json");

pub fn test_config() -> Config {
    let mut config = Config::default();
    // Minimum bcrypt cost keeps the demo user bootstrap fast
    config.auth.bcrypt_cost = 4;
    config
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Router over the full seeded catalog
pub async fn create_test_app() -> Router {
    init_tracing();
    let state = AppState::new(test_config())
        .await
        .expect("Failed to initialize test app state");
    create_router(Arc::new(state))
}

/// Router over the four-question fixture in tests/fixtures
pub async fn create_small_test_app() -> Router {
    create_small_test_app_with(test_config()).await
}

pub async fn create_small_test_app_with(config: Config) -> Router {
    init_tracing();
    let catalog = Catalog::load(SMALL_FIXTURE)
        .await
        .expect("Failed to load small fixture");
    let state = AppState::with_catalog(config, catalog)
        .await
        .expect("Failed to initialize test app state");
    create_router(Arc::new(state))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
