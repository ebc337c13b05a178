//! Auth Config

use clap::Args;
use greengrocer_app::auth::{DEFAULT_TOKEN_LIFETIME_MINUTES, JwtConfig, TokenError};

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign bearer tokens (at least 32 bytes)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Token lifetime in minutes
    #[arg(long, env = "JWT_EXPIRATION_MINUTES", default_value_t = DEFAULT_TOKEN_LIFETIME_MINUTES)]
    pub jwt_expiration_minutes: i64,
}

impl AuthConfig {
    /// Validated signing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is too short or the lifetime is not positive.
    pub fn jwt_config(&self) -> Result<JwtConfig, TokenError> {
        JwtConfig::new(&self.jwt_secret, self.jwt_expiration_minutes)
    }
}
