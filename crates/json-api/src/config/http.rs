//! HTTP Policy Config

use std::time::Duration;

use clap::Args;

/// Browser origins allowed by default, the storefront's local dev servers.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:3003",
];

/// Cross-origin, rate limit and compression settings applied to every route.
#[derive(Debug, Clone, Args)]
pub struct HttpPolicyConfig {
    /// Comma-separated origins allowed to call the API from a browser
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_ALLOWED_ORIGINS
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Requests each client IP may make per window
    #[arg(long, env = "RATE_LIMIT_MAX_REQUESTS", default_value_t = 100)]
    pub rate_limit_max_requests: usize,

    /// Length of the rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECONDS", default_value_t = 900)]
    pub rate_limit_window_seconds: u64,
}

impl HttpPolicyConfig {
    /// Requests allowed per window, at least one.
    #[must_use]
    pub fn rate_limit(&self) -> usize {
        self.rate_limit_max_requests.max(1)
    }

    /// Rate limit window, at least one second.
    #[must_use]
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_seconds.max(1))
    }
}
