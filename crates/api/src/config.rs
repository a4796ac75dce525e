//! Application configuration loaded from environment variables.

use std::time::Duration;

use orchestrator::{NotificationChannel, OrchestratorConfig};

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string (unset: in-memory store)
/// - `USER_SERVICE_URL` (default: `http://localhost:8081`)
/// - `FLIGHT_SERVICE_URL` (default: `http://localhost:8082`)
/// - `HOTEL_SERVICE_URL` (default: `http://localhost:8083`)
/// - `NOTIFICATION_SERVICE_URL` (default: `http://localhost:8084`)
/// - `GATEWAY_TIMEOUT_MS`: bound on each collaborator call (default: `5000`)
/// - `NOTIFICATION_TYPE`: `EMAIL` or `SMS` (default: `EMAIL`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub user_service_url: String,
    pub flight_service_url: String,
    pub hotel_service_url: String,
    pub notification_service_url: String,
    pub gateway_timeout: Duration,
    pub notification_channel: NotificationChannel,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_channel(value: &str) -> Option<NotificationChannel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "EMAIL" => Some(NotificationChannel::Email),
        "SMS" => Some(NotificationChannel::Sms),
        _ => None,
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("HOST", &defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: env_or("RUST_LOG", &defaults.log_level),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            user_service_url: env_or("USER_SERVICE_URL", &defaults.user_service_url),
            flight_service_url: env_or("FLIGHT_SERVICE_URL", &defaults.flight_service_url),
            hotel_service_url: env_or("HOTEL_SERVICE_URL", &defaults.hotel_service_url),
            notification_service_url: env_or(
                "NOTIFICATION_SERVICE_URL",
                &defaults.notification_service_url,
            ),
            gateway_timeout: std::env::var("GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.gateway_timeout),
            notification_channel: std::env::var("NOTIFICATION_TYPE")
                .ok()
                .and_then(|v| parse_channel(&v))
                .unwrap_or(defaults.notification_channel),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Orchestrator settings derived from this configuration.
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_gateway_timeout(self.gateway_timeout)
            .with_notification_channel(self.notification_channel)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            user_service_url: "http://localhost:8081".to_string(),
            flight_service_url: "http://localhost:8082".to_string(),
            hotel_service_url: "http://localhost:8083".to_string(),
            notification_service_url: "http://localhost:8084".to_string(),
            gateway_timeout: orchestrator::DEFAULT_GATEWAY_TIMEOUT,
            notification_channel: NotificationChannel::Email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.database_url.is_none());
        assert_eq!(config.user_service_url, "http://localhost:8081");
        assert_eq!(config.notification_service_url, "http://localhost:8084");
        assert_eq!(config.gateway_timeout, Duration::from_secs(5));
        assert_eq!(config.notification_channel, NotificationChannel::Email);
    }

    #[test]
    fn test_parse_channel() {
        assert_eq!(parse_channel("SMS"), Some(NotificationChannel::Sms));
        assert_eq!(parse_channel(" email "), Some(NotificationChannel::Email));
        assert_eq!(parse_channel("pigeon"), None);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_orchestrator_config_uses_timeout_and_channel() {
        let config = Config {
            gateway_timeout: Duration::from_millis(250),
            notification_channel: NotificationChannel::Sms,
            ..Config::default()
        };
        let orchestrator_config = config.orchestrator_config();
        assert_eq!(orchestrator_config.gateway_timeout, Duration::from_millis(250));
        assert_eq!(
            orchestrator_config.notification_channel,
            NotificationChannel::Sms
        );
    }
}
