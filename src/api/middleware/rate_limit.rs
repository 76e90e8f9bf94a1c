//! Rate limiting middleware using token bucket algorithm.

use crate::api::dto::notification::NotificationResponse;
use anyhow::{Context, Result};
use axum::{
    Json,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests";

/// Keys requests by client IP.
///
/// Uses the socket peer address unless the service runs behind a trusted
/// proxy, in which case `X-Forwarded-For` / `X-Real-IP` / `Forwarded` are
/// consulted first.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates a per-IP rate limiter for the API routes.
///
/// # Limits
///
/// - **Replenish**: one request every `interval_ms` milliseconds
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Pair the
/// layer with [`render_rejection`] so the body keeps the API's
/// `{ success, message }` shape.
///
/// # Errors
///
/// Returns an error if either limit is zero.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/send-notification", post(send_notification_handler))
///     .layer(rate_limit::layer(false, 100, 100)?)
///     .layer(map_response(rate_limit::render_rejection));
/// ```
pub fn layer(
    behind_proxy: bool,
    interval_ms: u64,
    burst: u32,
) -> Result<GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(interval_ms)
        .burst_size(burst)
        .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
        .finish()
        .context("rate limit interval and burst size must be non-zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Replaces the limiter's plain-text 429 body with
/// `{ "success": false, "message": "Too many requests" }`.
///
/// Other responses pass through untouched. Limiter headers such as
/// `retry-after` are kept.
pub async fn render_rejection(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut rendered = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(NotificationResponse::failure(RATE_LIMITED_MESSAGE)),
    )
        .into_response();

    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().insert(name.clone(), value.clone());
        }
    }

    tracing::debug!("Request rate limited");
    rendered
}
