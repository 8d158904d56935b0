//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB, cache, audit queue (public)
//! - `/api/public/*`     - Storefront reads (public)
//! - `/api/checkout/*`   - Checkout (Bearer token required)
//! - `/api/admin/*`      - Admin reads (Bearer token and permission required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Audit** - Every `/api` request is queued for the audit trail
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token resolved to a principal
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{audit, auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with trailing slashes trimmed before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes and middleware, without path normalization.
///
/// Client IP resolution (rate limiting, audit) follows `state.behind_proxy`:
/// when `true`, the IP is read from `X-Forwarded-For` / `X-Real-IP` instead of
/// the peer socket address. Enable only behind a trusted reverse proxy.
pub fn router(state: AppState) -> Router {
    let behind_proxy = state.behind_proxy;

    let public = api::routes::public_routes().layer(rate_limit::layer(behind_proxy));

    let checkout = api::routes::checkout_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy));

    let admin = api::routes::admin_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy));

    let api_router = Router::new()
        .nest("/public", public)
        .nest("/checkout", checkout)
        .nest("/admin", admin);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .layer(middleware::from_fn_with_state(state.clone(), audit::layer))
        .with_state(state)
        .layer(tracing::layer())
}
