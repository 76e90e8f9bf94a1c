//! Handler for the notification endpoint.

use axum::{Json, body::Bytes, extract::State};

use crate::api::dto::notification::{NotificationResponse, SendNotificationRequest};
use crate::domain::entities::DeliveryOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Sends one notification email.
///
/// # Endpoint
///
/// `POST /api/send-notification`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "user@example.com",
///   "subject": "Welcome",
///   "mailBody": "<p>Hello</p>"
/// }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: `{ "success": true, "message": "Notification email sent successfully" }`
/// - **400 Bad Request**: a field is missing or empty; the transport is not called
/// - **500 Internal Server Error**: `"Failed to send notification email"` when the
///   server did not accept the message, `"Server error"` for any other failure
///
/// The body is decoded by hand instead of through the `Json` extractor so
/// that malformed JSON, a non-object body or a missing content type maps to
/// the generic 500.
pub async fn send_notification_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<NotificationResponse>, AppError> {
    let request = SendNotificationRequest::from_json(&body)?.into_request()?;

    match state
        .notification_service
        .send_mail(&request.recipient, &request.subject, &request.body)
        .await
    {
        DeliveryOutcome::Sent => Ok(Json(NotificationResponse::sent())),
        DeliveryOutcome::Rejected { reply } => Err(AppError::DeliveryRejected { reply }),
        DeliveryOutcome::TransportError(e) => Err(e.into()),
    }
}
