//! Top-level router combining pages, admin routes and the health check.
//!
//! # Route Structure
//!
//! - `/`, `/archive`, `/about`, `/feed`, `/t/*`, `/e/*`, `/{slug}` - public pages
//! - `/compose`, `/delete`, `/hide` - admin (session cookie required)
//! - `GET /health` - store and cache check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Admin guard** - Session cookie check on editor routes
//! - **SUP header** - `X-SUP-ID` on `HEAD` feed requests
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use crate::web::middleware::{admin_guard, sup_header};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with their per-route middleware, without rate limiting or
/// request tracing.
pub fn blog_router(state: AppState) -> Router {
    let admin = web::routes::admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        admin_guard::layer,
    ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(web::routes::public_routes())
        .merge(admin)
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            sup_header::layer,
        ))
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = blog_router(state);
    let router = if behind_proxy {
        router.layer(rate_limit::proxied_layer())
    } else {
        router.layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(router.layer(tracing::layer()))
}
