//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                - Health check: SMTP connectivity (public)
//! - `POST /api/send-notification` - Send a notification email (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api/*` (configurable for proxy deployments),
//!   rejections rendered as `{ success, message }`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::middleware::map_response;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `config` - supplies the rate limit settings and whether the service
///   runs behind a trusted reverse proxy
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let api_router = api::routes::api_routes()
        .layer(rate_limit::layer(
            config.behind_proxy,
            config.rate_limit_interval_ms,
            config.rate_limit_burst,
        )?)
        .layer(map_response(rate_limit::render_rejection));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
