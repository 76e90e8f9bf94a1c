//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations on top of the traits defined in
//! [`crate::domain`] and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::notification_service::NotificationService`] - Notification delivery through the configured transport

pub mod services;
