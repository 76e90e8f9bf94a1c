//! Shared application state injected into all handlers.

use crate::application::services::NotificationService;
use std::sync::Arc;

/// Process-wide state. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// The single mail transport client, constructed once at startup.
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(notification_service: Arc<NotificationService>) -> Self {
        Self {
            notification_service,
        }
    }
}
