//! DTOs for the notification endpoint.

use crate::domain::entities::NotificationRequest;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

pub const SENT_MESSAGE: &str = "Notification email sent successfully";

/// Inbound notification payload.
///
/// Every field is optional at the decoding stage so that absent, `null` and
/// empty values all surface as a validation failure rather than a decode
/// error.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    /// Recipient address.
    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    pub subject: Option<String>,

    /// HTML body.
    #[validate(required, length(min = 1))]
    pub mail_body: Option<String>,
}

impl SendNotificationRequest {
    /// Decodes a raw request body.
    ///
    /// Only a JSON object is accepted. Arrays and scalars are refused
    /// even when their elements would line up with the fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the body is not valid JSON, is
    /// not an object, or has a field of the wrong type.
    pub fn from_json(body: &[u8]) -> Result<Self, AppError> {
        match serde_json::from_slice::<Value>(body)? {
            object @ Value::Object(_) => Ok(serde_json::from_value(object)?),
            other => Err(AppError::internal(
                "Request body is not a JSON object",
                json_kind(&other),
            )),
        }
    }

    /// Validates the payload and converts it into a domain request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming every missing or empty field.
    pub fn into_request(self) -> Result<NotificationRequest, AppError> {
        self.validate()?;

        let Self {
            email,
            subject,
            mail_body,
        } = self;

        NotificationRequest::new(
            email.unwrap_or_default(),
            subject.unwrap_or_default(),
            mail_body.unwrap_or_default(),
        )
        .ok_or_else(|| AppError::missing_fields(Vec::new()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Body of every response produced by the notification endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
}

impl NotificationResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT_MESSAGE.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
