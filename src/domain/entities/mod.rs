//! Core domain entities for notification delivery.
//!
//! All entities are ephemeral: they live for a single request and nothing is
//! persisted.
//!
//! # Entity Types
//!
//! - [`NotificationRequest`] - A validated request to notify one recipient
//! - [`OutgoingEmail`] - The envelope handed to the transport
//! - [`DeliveryOutcome`] - The three-way result of one delivery attempt

pub mod notification;

pub use notification::{DeliveryOutcome, NotificationRequest, OutgoingEmail};
