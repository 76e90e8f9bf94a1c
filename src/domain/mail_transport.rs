//! Transport contract for handing an email to a mail server.

use crate::domain::entities::OutgoingEmail;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while attempting a delivery.
///
/// Every variant means the attempt itself failed, as opposed to a
/// [`TransportReply`] with `accepted == false`.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("TLS configuration error: {0}")]
    Tls(String),

    #[error("SMTP transport error: {0}")]
    Smtp(String),
}

/// Final reply of the mail server for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    /// Whether the server accepted the message for delivery.
    pub accepted: bool,
    /// Reply code and first line, e.g. `250 OK queued`.
    pub detail: String,
}

impl TransportReply {
    pub fn accepted(detail: impl Into<String>) -> Self {
        Self {
            accepted: true,
            detail: detail.into(),
        }
    }

    pub fn rejected(detail: impl Into<String>) -> Self {
        Self {
            accepted: false,
            detail: detail.into(),
        }
    }
}

/// A mechanism capable of submitting one email to a mail server.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpMailTransport`] - SMTP via `lettre`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submits one message and returns the server's final reply.
    ///
    /// Each call releases its connection (or returns it to the pool) before
    /// returning, whether it succeeds or fails.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the message cannot be built or the SMTP
    /// exchange fails (network, TLS, authentication, error replies).
    async fn submit(&self, email: OutgoingEmail) -> Result<TransportReply, MailError>;

    /// Opens a connection to the server and closes it again.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Smtp`] if the server cannot be reached.
    async fn test_connection(&self) -> Result<(), MailError>;
}
