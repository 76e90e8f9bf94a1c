//! API route configuration.

use crate::api::handlers::send_notification_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /send-notification` - Send one notification email
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/send-notification", post(send_notification_handler))
}
