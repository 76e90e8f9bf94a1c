//! Business logic services for the application layer.

pub mod notification_service;

pub use notification_service::NotificationService;
