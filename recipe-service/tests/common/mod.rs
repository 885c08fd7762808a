#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use recipe_service::services::providers::mock::MockCompletionClient;
use recipe_service::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_MODEL: &str = "llama-3.1-8b-instant";

/// Router wired to `client`, plus a handle to inspect its calls.
pub fn test_app(client: MockCompletionClient) -> (Router, Arc<MockCompletionClient>) {
    let client = Arc::new(client);
    let router = build_router(AppState::new(client.clone(), TEST_MODEL));
    (router, client)
}

/// Send one request and return status plus JSON body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-recipe")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}
