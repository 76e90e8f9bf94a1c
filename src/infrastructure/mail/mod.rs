//! Outbound mail transport.
//!
//! Provides [`SmtpMailTransport`], the production implementation of
//! [`crate::domain::mail_transport::MailTransport`] backed by `lettre`.

mod smtp_transport;

pub use smtp_transport::SmtpMailTransport;
