//! # Notification Mailer
//!
//! Outbound notification delivery for a content-managed website: a
//! configuration-driven SMTP transport behind a single Axum endpoint.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Notification entities and the transport trait
//! - **Application Layer** ([`application`]) - The notification client
//! - **Infrastructure Layer** ([`infrastructure`]) - SMTP transport via `lettre`
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request Lifecycle
//!
//! `POST /api/send-notification` decodes and validates the payload, makes
//! exactly one delivery attempt and answers with `{ "success", "message" }`:
//!
//! | Condition | Status | Message |
//! |---|---|---|
//! | missing field | 400 | `Missing required fields` |
//! | transport rejected | 500 | `Failed to send notification email` |
//! | success | 200 | `Notification email sent successfully` |
//! | unexpected error | 500 | `Server error` |
//! | per-IP rate limit exceeded | 429 | `Too many requests` |
//!
//! ## Quick Start
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"
//! export SMTP_USER="noreply@example.com"
//! export SMTP_PASS="app-password"
//! export SMTP_SECURE="true"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::NotificationService;
    pub use crate::config::{Config, TransportSettings};
    pub use crate::domain::entities::{DeliveryOutcome, NotificationRequest, OutgoingEmail};
    pub use crate::domain::mail_transport::{MailError, MailTransport, TransportReply};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
