//! HTTP API 模块
//!
//! 每个子模块对应一组路由 (mod.rs 装配路由, handler.rs 实现处理函数)。
//! [`build_app`] 装配完整的中间件栈。

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::core::ServerState;

pub mod auth;
pub mod banners;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod upload;

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
        // Storefront + admin API
        .merge(products::router())
        .merge(orders::router())
        .merge(banners::router())
        .merge(categories::router())
        // Auth API
        .merge(auth::router())
        // Upload API - admin only (gated by the auth middleware)
        .merge(upload::router())
        // Health API - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    let public_dir = state.config.public_dir();

    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // ========== Application Middleware ==========
        // Admin authentication - public storefront routes are whitelisted
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ))
        // Uploaded images (product photos, banner art)
        .nest_service("/public", ServeDir::new(public_dir))
        .with_state(state)
}
