//! HTTP server initialization and runtime setup.
//!
//! Builds the mail transport client once, wires it into the router and runs
//! the Axum server until a shutdown signal arrives.

use crate::application::services::NotificationService;
use crate::config::{Config, TransportSettings};
use crate::infrastructure::mail::SmtpMailTransport;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Builds the process-wide notification client from transport settings.
///
/// No connection is opened here; the first delivery (or health check)
/// connects.
///
/// # Errors
///
/// Returns an error if the SMTP host is not a valid TLS server name.
pub fn build_notification_service(settings: &TransportSettings) -> Result<NotificationService> {
    let transport = SmtpMailTransport::from_settings(settings)
        .context("Failed to configure SMTP transport")?;

    Ok(NotificationService::new(
        Arc::new(transport),
        settings.auth_user.clone(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SMTP transport client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The transport cannot be configured
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let notification_service = build_notification_service(&config.mail)?;
    tracing::info!(
        host = %config.mail.host,
        port = config.mail.port,
        "Mail transport ready"
    );

    let state = AppState::new(Arc::new(notification_service));

    let app = app_router(state, &config)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
