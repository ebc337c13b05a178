//! Client Config

use std::time::Duration;

use clap::Parser;

/// Default seconds between order status polls.
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;

/// Where the API lives and how often to poll it.
#[derive(Debug, Clone, Parser)]
#[command(name = "greengrocer-client")]
pub struct ClientConfig {
    /// Base URL of the JSON API
    #[arg(long, env = "GREENGROCER_API_URL", default_value = "http://localhost:8698")]
    pub api_url: String,

    /// Seconds between order status polls
    #[arg(
        long,
        env = "GREENGROCER_POLL_INTERVAL_SECONDS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECONDS
    )]
    pub poll_interval_seconds: u64,
}

impl ClientConfig {
    /// Read settings from the environment, loading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse_from(["greengrocer-client"])
    }

    /// Interval between polls, never shorter than one second.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds.max(1))
    }
}
