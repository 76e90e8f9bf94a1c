//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Mail transport**: Opens and closes a connection to the SMTP server
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "mail_transport": {
///       "status": "ok",
///       "message": "SMTP server reachable"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let transport_check = check_mail_transport(&state).await;

    let all_healthy = transport_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            mail_transport: transport_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks SMTP connectivity.
async fn check_mail_transport(state: &AppState) -> CheckStatus {
    match state.notification_service.check_transport().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some("SMTP server reachable".to_string()),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Mail transport health check failed");
            CheckStatus {
                status: "error".to_string(),
                message: Some("SMTP server unreachable".to_string()),
            }
        }
    }
}
