//! Shared test harness
//!
//! Boots a full ServerState over a throwaway data directory and drives
//! the router in-process through tower oneshot calls.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use canteen_server::{Config, ServerState};
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Fresh state over a temp directory
///
/// The TempDir must outlive the test; dropping it removes the database
/// files under the open handle.
pub async fn setup() -> (TempDir, ServerState) {
    let dir = TempDir::new().expect("create temp dir");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize state");
    (dir, state)
}

pub fn app(state: &ServerState) -> Router {
    canteen_server::api::app(state.clone())
}

/// Send a request, return status plus parsed JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse body")
    };
    (status, value)
}

pub async fn get(state: &ServerState, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(http::Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("build request");
    send(app(state), request).await
}

pub async fn post_json(state: &ServerState, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(http::Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app(state), request).await
}

pub async fn patch_json(state: &ServerState, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(http::Method::PATCH)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app(state), request).await
}
