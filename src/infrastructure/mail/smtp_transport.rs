//! SMTP transport built on `lettre`'s async Tokio transport.

use crate::config::TransportSettings;
use crate::domain::entities::OutgoingEmail;
use crate::domain::mail_transport::{MailError, MailTransport, TransportReply};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

/// SMTP transport configured once from [`TransportSettings`].
///
/// Wraps `AsyncSmtpTransport<Tokio1Executor>`, whose internal pool reuses
/// connections across submissions. Cloning is not needed: share it behind
/// an `Arc`.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Builds the transport without opening a connection.
    ///
    /// - `secure = true` wraps the connection in TLS from the first byte.
    /// - `secure = false` connects in plaintext and upgrades with STARTTLS
    ///   when the server advertises it.
    ///
    /// Credentials are always attached, even when empty, so missing
    /// credentials fail at authentication time.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Tls`] if `host` is not a valid TLS server name.
    pub fn from_settings(settings: &TransportSettings) -> Result<Self, MailError> {
        let tls_parameters = TlsParameters::new(settings.host.clone())
            .map_err(|e| MailError::Tls(e.to_string()))?;

        let tls = if settings.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(
                settings.auth_user.clone(),
                settings.auth_password.clone(),
            ))
            .build();

        debug!(
            host = %settings.host,
            port = settings.port,
            mode = settings.security_mode(),
            "SMTP transport configured"
        );

        Ok(Self { transport })
    }

    fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
        let from = parse_mailbox(&email.from)?;
        let to = parse_mailbox(&email.to)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| MailError::Message(e.to_string()))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| {
        MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        }
    })
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn submit(&self, email: OutgoingEmail) -> Result<TransportReply, MailError> {
        let message = Self::build_message(&email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        let detail = match response.first_line() {
            Some(line) => format!("{} {}", response.code(), line),
            None => response.code().to_string(),
        };

        if response.is_positive() {
            Ok(TransportReply::accepted(detail))
        } else {
            Ok(TransportReply::rejected(detail))
        }
    }

    async fn test_connection(&self) -> Result<(), MailError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::Smtp(
                "server did not acknowledge the connection test".to_string(),
            )),
            Err(e) => Err(MailError::Smtp(e.to_string())),
        }
    }
}
