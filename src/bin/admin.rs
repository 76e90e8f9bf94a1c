//! CLI administration tool for notification-mailer.
//!
//! Inspects the mail transport configuration and exercises the transport
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the resolved configuration (password masked)
//! cargo run --bin admin -- config
//!
//! # Check that the SMTP server is reachable
//! cargo run --bin admin -- check
//!
//! # Send a test notification
//! cargo run --bin admin -- send --to ops@example.com --subject "Test" --body "<p>Hi</p>"
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `SMTP_HOST`, `SMTP_PORT`, `SMTP_SECURE`, `SMTP_SERVICE`,
//! `SMTP_USER`, `SMTP_PASS`, `SUPPORT_EMAIL`. A `.env` file is honoured.

use notification_mailer::config::{Config, TransportSettings, mask_secret};
use notification_mailer::domain::entities::{DeliveryOutcome, NotificationRequest};
use notification_mailer::server::build_notification_service;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};

/// CLI tool for managing notification-mailer.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show resolved configuration
    Config,

    /// Check SMTP connectivity
    Check,

    /// Send a test notification
    Send {
        /// Recipient (defaults to SUPPORT_EMAIL when set)
        #[arg(long)]
        to: Option<String>,

        /// Subject line
        #[arg(short, long, default_value = "Test notification")]
        subject: String,

        /// HTML body
        #[arg(short, long, default_value = "<p>This is a test notification.</p>")]
        body: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = TransportSettings::from_env();

    match cli.command {
        Commands::Config => show_config(&Config::from_env()),
        Commands::Check => check_connection(&settings).await?,
        Commands::Send {
            to,
            subject,
            body,
            yes,
        } => send_test(&settings, to, subject, body, yes).await?,
    }

    Ok(())
}

/// Prints the resolved configuration.
fn show_config(config: &Config) {
    let mail = &config.mail;

    println!("{}", "⚙️  Configuration".bright_blue().bold());
    println!();
    println!("{}", "Mail transport:".bright_white().bold());
    println!("  Host:          {}", mail.host.cyan());
    println!("  Port:          {}", mail.port.to_string().cyan());
    println!("  Security:      {}", mail.security_mode().cyan());
    println!("  Service:       {}", mail.service.cyan());
    println!("  User:          {}", display_or_unset(&mail.auth_user));
    println!("  Password:      {}", mask_secret(&mail.auth_password).bright_black());
    println!("  Support email: {}", display_or_unset(&mail.support_email));
    println!();
    println!("{}", "Server:".bright_white().bold());
    println!("  Listen:        {}", config.listen_addr.cyan());
    println!("  Log:           {} ({})", config.log_level.cyan(), config.log_format);
    println!(
        "  Rate limit:    1 / {}ms, burst {}{}",
        config.rate_limit_interval_ms,
        config.rate_limit_burst,
        if config.behind_proxy { ", behind proxy" } else { "" }
    );
    println!();

    if mail.auth_user.is_empty() || mail.auth_password.is_empty() {
        println!(
            "{}",
            "⚠️  SMTP_USER or SMTP_PASS is empty: deliveries will fail to authenticate".yellow()
        );
        println!();
    }

    if let Err(e) = config.validate() {
        println!("{} {}", "❌ Invalid server configuration:".red().bold(), e);
        println!();
    }
}

fn display_or_unset(value: &str) -> ColoredString {
    if value.is_empty() {
        "<unset>".bright_black()
    } else {
        value.cyan()
    }
}

/// Opens and closes a connection to the configured SMTP server.
async fn check_connection(settings: &TransportSettings) -> Result<()> {
    println!("{}", "🔌 Checking SMTP connection".bright_blue().bold());
    println!(
        "  {}:{} via {}",
        settings.host.cyan(),
        settings.port.to_string().cyan(),
        settings.security_mode()
    );
    println!();

    let service = build_notification_service(settings)?;

    match service.check_transport().await {
        Ok(()) => {
            println!("{}", "✅ SMTP server reachable".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Connection failed:".red().bold(), e);
            anyhow::bail!("SMTP connection check failed")
        }
    }
}

/// Sends one test notification through the same client as the endpoint.
///
/// # Flow
///
/// 1. Resolve recipient (flag, then `SUPPORT_EMAIL`, then prompt)
/// 2. Display message details
/// 3. Confirm sending (unless `--yes` flag)
/// 4. Make a single delivery attempt and report the outcome
async fn send_test(
    settings: &TransportSettings,
    to: Option<String>,
    subject: String,
    body: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✉️  Send Test Notification".bright_blue().bold());
    println!();

    let recipient = match to {
        Some(addr) => addr,
        None if settings.has_support_email() => settings.support_email.clone(),
        None => Input::<String>::new()
            .with_prompt("Recipient address")
            .interact_text()?,
    };

    let request = NotificationRequest::new(recipient, subject, body)
        .context("Recipient, subject and body must all be non-empty")?;

    println!("{}", "Message details:".bright_white().bold());
    println!("  From:    {}", display_or_unset(&settings.auth_user));
    println!("  To:      {}", request.recipient.cyan());
    println!("  Subject: {}", request.subject.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Send this message?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = build_notification_service(settings)?;

    match service
        .send_mail(&request.recipient, &request.subject, &request.body)
        .await
    {
        DeliveryOutcome::Sent => {
            println!("{}", "✅ Notification sent".green().bold());
            Ok(())
        }
        DeliveryOutcome::Rejected { reply } => {
            println!("{} {}", "⚠️  Server did not accept the message:".yellow().bold(), reply);
            anyhow::bail!("delivery rejected")
        }
        DeliveryOutcome::TransportError(e) => {
            println!("{} {}", "❌ Delivery failed:".red().bold(), e);
            anyhow::bail!("delivery failed")
        }
    }
}
