//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    http::HttpPolicyConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod http;
pub(crate) mod observability;
pub(crate) mod server;

/// Greengrocer JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "greengrocer-json", about = "Greengrocer JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// CORS, rate limit and compression settings.
    #[command(flatten)]
    pub http: HttpPolicyConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const SECRET: &str = "a-json-api-test-secret-of-enough-length";

    #[test]
    fn parses_required_settings_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "greengrocer-json",
            "--database-url",
            "postgres://localhost/greengrocer",
            "--jwt-secret",
            SECRET,
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.auth.jwt_expiration_minutes, 1440);
        assert!(!config.database.run_migrations);
        assert!(config.auth.jwt_config().is_ok());

        Ok(())
    }

    #[test]
    fn short_jwt_secret_is_rejected() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "greengrocer-json",
            "--database-url",
            "postgres://localhost/greengrocer",
            "--jwt-secret",
            "too-short",
        ])?;

        assert!(
            config.auth.jwt_config().is_err(),
            "expected a short secret to be rejected"
        );

        Ok(())
    }
}
