//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`foods`] - menu endpoints
//! - [`offers`] - offer and coupon endpoints
//! - [`orders`] - order endpoints
//! - [`ws`] - WebSocket push endpoint

pub mod foods;
pub mod health;
pub mod offers;
pub mod orders;
pub mod ws;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(foods::router())
        .merge(offers::router())
        .merge(orders::router())
        .merge(ws::router())
}

/// Build the complete application with state and middleware
pub fn app(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
