//! Domain layer containing the notification model and the transport contract.
//!
//! # Architecture
//!
//! - [`entities`] - Notification request, outgoing email and delivery outcome
//! - [`mail_transport`] - Transport trait implemented by the infrastructure layer
//!
//! # Delivery Flow
//!
//! 1. HTTP handler validates the payload into an [`entities::NotificationRequest`]
//! 2. [`crate::application::services::NotificationService`] builds an
//!    [`entities::OutgoingEmail`] and submits it through [`mail_transport::MailTransport`]
//! 3. The transport reply is folded into a [`entities::DeliveryOutcome`]
//! 4. The handler maps the outcome to an HTTP response

pub mod entities;
pub mod mail_transport;
