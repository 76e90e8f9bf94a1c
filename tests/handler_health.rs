mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use common::{StubBehavior, StubTransport};
use notification_mailer::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state(StubTransport::new(StubBehavior::Accept));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["mail_transport"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let state = common::create_test_state(StubTransport::unreachable());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["mail_transport"]["status"], "error");
    assert!(
        !json.to_string().contains("connection refused"),
        "transport detail must stay in the logs"
    );
}
