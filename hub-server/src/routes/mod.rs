use std::time::Duration;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod agents;
pub mod branches;
pub mod health;
pub mod orders;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Orders board and lifecycle
        .merge(orders::router())
        // Delivery agents per branch
        .merge(agents::router())
        // Branch directory
        .merge(branches::router())
        // Health - public route
        .merge(health::router())
}

/// Build the fully layered application
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - the board runs in a mobile webview
        .layer(CorsLayer::permissive())
        // Gzip compress responses
        .layer(CompressionLayer::new())
        // Cut off handlers that exceed the configured request timeout
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Unique ID per request, propagated to the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
