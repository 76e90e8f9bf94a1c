//! Notification delivery service.

use crate::domain::entities::{DeliveryOutcome, OutgoingEmail};
use crate::domain::mail_transport::{MailError, MailTransport};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Client for delivering notification emails through one configured transport.
///
/// Built once at startup and shared across requests. Holds no mutable
/// state, so concurrent calls never contend with each other.
pub struct NotificationService {
    transport: Arc<dyn MailTransport>,
    sender: String,
}

impl NotificationService {
    /// Creates a new notification service.
    ///
    /// # Arguments
    ///
    /// - `transport` - transport every delivery goes through
    /// - `sender` - envelope `From` address (the configured SMTP user)
    pub fn new(transport: Arc<dyn MailTransport>, sender: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
        }
    }

    /// Attempts exactly one delivery of an HTML email.
    ///
    /// Inputs are expected to be validated by the caller and are not
    /// re-checked. Never retries.
    ///
    /// Returns:
    /// - [`DeliveryOutcome::Sent`] when the server accepted the message
    /// - [`DeliveryOutcome::Rejected`] when the exchange completed without
    ///   the message being accepted
    /// - [`DeliveryOutcome::TransportError`] when the attempt failed
    pub async fn send_mail(&self, recipient: &str, subject: &str, body: &str) -> DeliveryOutcome {
        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: recipient.to_string(),
            subject: subject.to_string(),
            html_body: body.to_string(),
        };

        let outcome = match self.transport.submit(email).await {
            Ok(reply) if reply.accepted => {
                tracing::debug!(recipient, reply = %reply.detail, "SMTP server accepted message");
                DeliveryOutcome::Sent
            }
            Ok(reply) => DeliveryOutcome::Rejected {
                reply: reply.detail,
            },
            Err(e) => DeliveryOutcome::TransportError(e),
        };

        log_outcome(recipient, subject, &outcome);
        outcome
    }

    /// Checks that the mail server is reachable.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`MailError`] when the connection test fails.
    pub async fn check_transport(&self) -> Result<(), MailError> {
        self.transport.test_connection().await
    }
}

fn log_outcome(recipient: &str, subject: &str, outcome: &DeliveryOutcome) {
    let label = outcome.label();

    match outcome {
        DeliveryOutcome::Sent => {
            info!(recipient, subject, outcome = label, "Notification email sent");
        }
        DeliveryOutcome::Rejected { reply } => {
            warn!(recipient, subject, outcome = label, reply = %reply, "Notification email rejected");
        }
        DeliveryOutcome::TransportError(e) => {
            error!(recipient, subject, outcome = label, error = %e, "Notification email delivery failed");
        }
    }
}
