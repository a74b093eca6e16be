//! Dashboard runtime configuration
//!
//! The division table is compiled in (see [`crate::DIVISIONS`]); this covers
//! only transport and presentation settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::resolve::STATS_FALLBACK;

/// Default bound on a single division fetch
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Default bound on establishing the connection
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Whole-request timeout; an expired fetch lands in the error state
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// TCP/TLS connect timeout
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// User-Agent sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Text shown in place of missing or blank driver stats
    #[serde(default = "default_stats_fallback")]
    pub stats_fallback: String,
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("urc-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

fn default_stats_fallback() -> String {
    STATS_FALLBACK.to_string()
}

impl DashboardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Reject settings that would make every fetch fail or hang
    pub fn validate(&self) -> crate::Result<()> {
        if self.request_timeout_ms == 0 {
            return Err(crate::Error::InvalidConfig(
                "request_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(crate::Error::InvalidConfig(
                "connect_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            stats_fallback: default_stats_fallback(),
        }
    }
}
