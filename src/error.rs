//! HTTP-facing error type.
//!
//! Every handler error ends up as one of three fixed `{ success, message }`
//! responses. Diagnostic detail goes to the logs, never to the body.

use crate::api::dto::notification::NotificationResponse;
use crate::domain::mail_transport::MailError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const DELIVERY_REJECTED_MESSAGE: &str = "Failed to send notification email";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug)]
pub enum AppError {
    /// A required request field is missing or empty.
    Validation { fields: Vec<String> },
    /// The transport completed but did not accept the message.
    DeliveryRejected { reply: String },
    /// Anything else: undecodable body, transport failure.
    Internal { context: &'static str, detail: String },
}

impl AppError {
    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self::Validation { fields }
    }

    pub fn internal(context: &'static str, detail: impl Into<String>) -> Self {
        Self::Internal {
            context,
            detail: detail.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::DeliveryRejected { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => MISSING_FIELDS_MESSAGE,
            AppError::DeliveryRejected { .. } => DELIVERY_REJECTED_MESSAGE,
            AppError::Internal { .. } => SERVER_ERROR_MESSAGE,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { fields } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            AppError::DeliveryRejected { reply } => write!(f, "delivery rejected: {reply}"),
            AppError::Internal { context, detail } => write!(f, "{context}: {detail}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::missing_fields(fields)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::internal("Failed to decode request body", e.to_string())
    }
}

impl From<MailError> for AppError {
    fn from(e: MailError) -> Self {
        AppError::internal("Mail transport error", e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation { fields } => {
                tracing::debug!(?fields, "Rejected notification request");
            }
            AppError::DeliveryRejected { .. } => {}
            AppError::Internal { context, detail } => {
                tracing::error!(error = %detail, "{context}");
            }
        }

        let body = NotificationResponse::failure(self.public_message());

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let response = AppError::missing_fields(vec!["email".to_string()]).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Missing required fields" })
        );
    }

    #[tokio::test]
    async fn test_rejected_response() {
        let response = AppError::DeliveryRejected {
            reply: "550 no such user".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Failed to send notification email" })
        );
    }

    #[tokio::test]
    async fn test_internal_response_hides_detail() {
        let error: AppError = MailError::Smtp("535 bad credentials for hunter2".to_string()).into();
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "success": false, "message": "Server error" }));
        assert!(!body.to_string().contains("hunter2"));
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let error = AppError::internal("Mail transport error", "connection refused");
        assert_eq!(error.to_string(), "Mail transport error: connection refused");
    }
}
