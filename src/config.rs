//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup. The mail transport settings are
//! resolved leniently (missing or malformed values fall back to defaults),
//! while the HTTP server settings are validated before the server starts.
//!
//! ## Mail Transport Variables
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"      # default: smtp.example.com
//! export SMTP_PORT="465"                 # default: 465 (unparsable values fall back)
//! export SMTP_SECURE="true"              # implicit TLS only when exactly "true"
//! export SMTP_SERVICE="gmail"            # default: gmail
//! export SMTP_USER="noreply@example.com" # sender address and login
//! export SMTP_PASS="app-password"
//! export SUPPORT_EMAIL="support@example.com"
//! ```
//!
//! `SMTP_USER` / `SMTP_PASS` have no defaults. When they are empty the
//! service still starts; deliveries then fail at the transport.
//!
//! ## Server Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from proxy headers (default: `false`)
//! - `RATE_LIMIT_INTERVAL_MS` - Milliseconds between token refills per client IP (default: 100)
//! - `RATE_LIMIT_BURST` - Burst size per client IP (default: 100)

use anyhow::Result;
use std::env;
use std::fmt;

pub const DEFAULT_SMTP_HOST: &str = "smtp.example.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_SMTP_SERVICE: &str = "gmail";
pub const DEFAULT_RATE_LIMIT_INTERVAL_MS: u64 = 100;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 100;

/// Connection parameters for the outbound SMTP transport.
///
/// Immutable once loaded. Built exactly once per process and handed to the
/// transport constructor.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub host: String,
    pub port: u16,
    /// `true` selects implicit TLS, `false` a plaintext connection upgraded
    /// with STARTTLS when the server offers it.
    pub secure: bool,
    /// Named provider identifier. Informational: explicit host/port/secure
    /// always take precedence.
    pub service: String,
    /// Login for the SMTP server, also used as the envelope sender.
    pub auth_user: String,
    pub auth_password: String,
    /// Operator contact address; empty when not configured.
    pub support_email: String,
}

impl TransportSettings {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings from an arbitrary variable lookup.
    ///
    /// Never fails: absent or malformed values are replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SMTP_HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());

        let port = lookup("SMTP_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        let secure = lookup("SMTP_SECURE").is_some_and(|v| v == "true");

        let service = lookup("SMTP_SERVICE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SMTP_SERVICE.to_string());

        let auth_user = lookup("SMTP_USER").unwrap_or_default();
        let auth_password = lookup("SMTP_PASS").unwrap_or_default();
        let support_email = lookup("SUPPORT_EMAIL").unwrap_or_default();

        Self {
            host,
            port,
            secure,
            service,
            auth_user,
            auth_password,
            support_email,
        }
    }

    /// Whether a support address is configured.
    pub fn has_support_email(&self) -> bool {
        !self.support_email.is_empty()
    }

    /// Human-readable connection mode for logs and the admin CLI.
    pub fn security_mode(&self) -> &'static str {
        if self.secure {
            "implicit TLS"
        } else {
            "STARTTLS (opportunistic)"
        }
    }
}

impl fmt::Debug for TransportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("service", &self.service)
            .field("auth_user", &self.auth_user)
            .field("auth_password", &mask_secret(&self.auth_password))
            .field("support_email", &self.support_email)
            .finish()
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Milliseconds between token refills of the per-IP rate limiter.
    pub rate_limit_interval_ms: u64,
    /// Requests a single client may issue in a burst.
    pub rate_limit_burst: u32,
    pub mail: TransportSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Never fails on its own; call [`Config::validate`] before use.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let rate_limit_interval_ms = env::var("RATE_LIMIT_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_INTERVAL_MS);

        let rate_limit_burst = env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_BURST);

        Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            rate_limit_interval_ms,
            rate_limit_burst,
            mail: TransportSettings::from_env(),
        }
    }

    /// Validates the server configuration.
    ///
    /// Mail settings are deliberately not checked here: bad credentials or
    /// addresses surface as delivery failures.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - a rate limit setting is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.rate_limit_interval_ms == 0 {
            anyhow::bail!("RATE_LIMIT_INTERVAL_MS must be at least 1");
        }
        if self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_BURST must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Rate limit: 1 request / {}ms, burst {}{}",
            self.rate_limit_interval_ms,
            self.rate_limit_burst,
            if self.behind_proxy { " (behind proxy)" } else { "" }
        );
        tracing::info!(
            "  SMTP: {}:{} via {} (service: {})",
            self.mail.host,
            self.mail.port,
            self.mail.security_mode(),
            self.mail.service
        );
        tracing::info!(
            "  SMTP user: {} / password: {}",
            if self.mail.auth_user.is_empty() {
                "<unset>"
            } else {
                self.mail.auth_user.as_str()
            },
            mask_secret(&self.mail.auth_password)
        );
        if self.mail.auth_user.is_empty() || self.mail.auth_password.is_empty() {
            tracing::warn!("SMTP_USER or SMTP_PASS is empty; deliveries will fail to authenticate");
        }
    }
}

/// Masks a secret for display, keeping only whether it is set.
pub fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "***" }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn test_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            rate_limit_interval_ms: DEFAULT_RATE_LIMIT_INTERVAL_MS,
            rate_limit_burst: DEFAULT_RATE_LIMIT_BURST,
            mail: TransportSettings::from_lookup(|_| None),
        }
    }

    #[test]
    fn test_transport_defaults() {
        let settings = TransportSettings::from_lookup(|_| None);

        assert_eq!(settings.host, "smtp.example.com");
        assert_eq!(settings.port, 465);
        assert!(!settings.secure);
        assert_eq!(settings.service, "gmail");
        assert_eq!(settings.support_email, "");
        assert_eq!(settings.auth_user, "");
        assert_eq!(settings.auth_password, "");
    }

    #[test]
    fn test_transport_defaults_are_idempotent() {
        let first = TransportSettings::from_lookup(|_| None);
        let second = TransportSettings::from_lookup(|_| None);

        assert_eq!(first, second);
    }

    #[test]
    fn test_unparsable_port_falls_back() {
        let settings = TransportSettings::from_lookup(lookup_from(&[("SMTP_PORT", "not-a-number")]));
        assert_eq!(settings.port, 465);

        let settings = TransportSettings::from_lookup(lookup_from(&[("SMTP_PORT", "70000")]));
        assert_eq!(settings.port, 465);

        let settings = TransportSettings::from_lookup(lookup_from(&[("SMTP_PORT", "587")]));
        assert_eq!(settings.port, 587);
    }

    #[test]
    fn test_secure_requires_exact_true() {
        for (value, expected) in [
            ("true", true),
            ("TRUE", false),
            ("True", false),
            ("1", false),
            ("yes", false),
            ("", false),
        ] {
            let settings = TransportSettings::from_lookup(lookup_from(&[("SMTP_SECURE", value)]));
            assert_eq!(settings.secure, expected, "SMTP_SECURE={value:?}");
        }
    }

    #[test]
    fn test_transport_values_pass_through() {
        let settings = TransportSettings::from_lookup(lookup_from(&[
            ("SMTP_HOST", "mail.example.org"),
            ("SMTP_PORT", "2525"),
            ("SMTP_SECURE", "true"),
            ("SMTP_SERVICE", "sendgrid"),
            ("SMTP_USER", "noreply@example.org"),
            ("SMTP_PASS", " spaced secret "),
            ("SUPPORT_EMAIL", "help@example.org"),
        ]));

        assert_eq!(settings.host, "mail.example.org");
        assert_eq!(settings.port, 2525);
        assert!(settings.secure);
        assert_eq!(settings.service, "sendgrid");
        assert_eq!(settings.auth_user, "noreply@example.org");
        assert_eq!(settings.auth_password, " spaced secret ");
        assert_eq!(settings.support_email, "help@example.org");
        assert!(settings.has_support_email());
    }

    #[test]
    fn test_debug_masks_password() {
        let settings = TransportSettings::from_lookup(lookup_from(&[("SMTP_PASS", "hunter2")]));
        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();
        config.rate_limit_interval_ms = 0;
        assert!(config.validate().is_err());

        config.rate_limit_interval_ms = 1;
        config.rate_limit_burst = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_ignores_empty_credentials() {
        let config = test_config();
        assert!(config.mail.auth_user.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_transport_settings_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SMTP_HOST", "env-host");
            env::set_var("SMTP_PORT", "not-a-number");
            env::set_var("SMTP_SECURE", "true");
            env::remove_var("SMTP_SERVICE");
        }

        let settings = TransportSettings::from_env();

        assert_eq!(settings.host, "env-host");
        assert_eq!(settings.port, 465);
        assert!(settings.secure);
        assert_eq!(settings.service, "gmail");

        // Cleanup
        unsafe {
            env::remove_var("SMTP_HOST");
            env::remove_var("SMTP_PORT");
            env::remove_var("SMTP_SECURE");
        }
    }

    #[test]
    #[serial]
    fn test_behind_proxy_flag() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BEHIND_PROXY", "1");
        }
        assert!(Config::from_env().behind_proxy);

        unsafe {
            env::set_var("BEHIND_PROXY", "TRUE");
        }
        assert!(Config::from_env().behind_proxy);

        unsafe {
            env::set_var("BEHIND_PROXY", "no");
        }
        assert!(!Config::from_env().behind_proxy);

        // Cleanup
        unsafe {
            env::remove_var("BEHIND_PROXY");
        }
    }

    #[test]
    #[serial]
    fn test_rate_limit_interval_from_env() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("RATE_LIMIT_INTERVAL_MS");
            env::remove_var("RATE_LIMIT_BURST");
        }
        let config = Config::from_env();
        assert_eq!(config.rate_limit_interval_ms, 100);
        assert_eq!(config.rate_limit_burst, 100);

        unsafe {
            env::set_var("RATE_LIMIT_INTERVAL_MS", "250");
            env::set_var("RATE_LIMIT_BURST", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.rate_limit_interval_ms, 250);
        assert_eq!(config.rate_limit_burst, 5);

        // The old name is not read.
        unsafe {
            env::remove_var("RATE_LIMIT_INTERVAL_MS");
            env::set_var("RATE_LIMIT_PER_SECOND", "7");
        }
        assert_eq!(Config::from_env().rate_limit_interval_ms, 100);

        // Cleanup
        unsafe {
            env::remove_var("RATE_LIMIT_PER_SECOND");
            env::remove_var("RATE_LIMIT_BURST");
        }
    }
}
