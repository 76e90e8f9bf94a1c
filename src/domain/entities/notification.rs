//! Domain entities describing a single notification delivery.

use crate::domain::mail_transport::MailError;

/// A validated request to deliver one notification email.
///
/// All fields are guaranteed non-empty; construct through
/// [`NotificationRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub recipient: String,
    pub subject: String,
    /// HTML (or plain text) body.
    pub body: String,
}

impl NotificationRequest {
    /// Creates a request, returning `None` if any field is empty.
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Option<Self> {
        let request = Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        };

        if request.recipient.is_empty() || request.subject.is_empty() || request.body.is_empty() {
            return None;
        }

        Some(request)
    }
}

/// Message envelope submitted to a [`crate::domain::mail_transport::MailTransport`].
///
/// Addresses are kept as raw strings; the transport parses them and reports
/// malformed ones as [`MailError::InvalidAddress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Result of one delivery attempt.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The transport accepted the message.
    Sent,
    /// The transport completed without error but did not accept the message.
    Rejected { reply: String },
    /// The attempt itself failed.
    TransportError(MailError),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Rejected { .. } => "rejected",
            Self::TransportError(_) => "transport_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_request_new() {
        let request = NotificationRequest::new("a@b.com", "Hi", "<p>Hello</p>").unwrap();

        assert_eq!(request.recipient, "a@b.com");
        assert_eq!(request.subject, "Hi");
        assert_eq!(request.body, "<p>Hello</p>");
    }

    #[test]
    fn test_notification_request_rejects_empty_fields() {
        assert!(NotificationRequest::new("", "Hi", "x").is_none());
        assert!(NotificationRequest::new("a@b.com", "", "x").is_none());
        assert!(NotificationRequest::new("a@b.com", "Hi", "").is_none());
    }

    #[test]
    fn test_delivery_outcome_labels() {
        assert!(DeliveryOutcome::Sent.is_sent());
        assert_eq!(DeliveryOutcome::Sent.label(), "sent");

        let rejected = DeliveryOutcome::Rejected {
            reply: "550 mailbox unavailable".to_string(),
        };
        assert!(!rejected.is_sent());
        assert_eq!(rejected.label(), "rejected");

        let failed = DeliveryOutcome::TransportError(MailError::Smtp("connection refused".into()));
        assert_eq!(failed.label(), "transport_error");
    }
}
