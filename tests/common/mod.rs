#![allow(dead_code)]

use async_trait::async_trait;
use notification_mailer::application::services::NotificationService;
use notification_mailer::domain::entities::OutgoingEmail;
use notification_mailer::domain::mail_transport::{MailError, MailTransport, TransportReply};
use notification_mailer::state::AppState;
use std::sync::{Arc, Mutex};

pub const SENDER: &str = "noreply@example.com";

/// What the stub answers to every submission.
#[derive(Clone, Copy)]
pub enum StubBehavior {
    Accept,
    Reject,
    Fail,
}

/// In-memory transport that records every submission.
pub struct StubTransport {
    behavior: StubBehavior,
    reachable: bool,
    submitted: Mutex<Vec<OutgoingEmail>>,
}

impl StubTransport {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            reachable: true,
            submitted: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            behavior: StubBehavior::Fail,
            reachable: false,
            submitted: Mutex::new(Vec::new()),
        })
    }

    pub fn submitted(&self) -> Vec<OutgoingEmail> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for StubTransport {
    async fn submit(&self, email: OutgoingEmail) -> Result<TransportReply, MailError> {
        self.submitted.lock().unwrap().push(email);

        match self.behavior {
            StubBehavior::Accept => Ok(TransportReply::accepted("250 2.0.0 OK queued")),
            StubBehavior::Reject => Ok(TransportReply::rejected("550 5.1.1 mailbox unavailable")),
            StubBehavior::Fail => Err(MailError::Smtp(
                "535 5.7.8 authentication failed for secret-password".to_string(),
            )),
        }
    }

    async fn test_connection(&self) -> Result<(), MailError> {
        if self.reachable {
            Ok(())
        } else {
            Err(MailError::Smtp("connection refused".to_string()))
        }
    }
}

pub fn create_test_state(transport: Arc<StubTransport>) -> AppState {
    let service = NotificationService::new(transport, SENDER);
    AppState::new(Arc::new(service))
}
