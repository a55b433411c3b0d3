//! Session gateway configuration.

use std::env;
use std::path::PathBuf;

use chrono::Duration;

use common::BackendConfig;

const DEFAULT_REFRESH_LEEWAY_SECS: i64 = 10;
const MAX_REFRESH_LEEWAY_SECS: i64 = 3600;

/// Session gateway configuration.
#[derive(Debug, Clone)]
pub struct SessionGatewayConfig {
    /// Hosted auth provider connection
    pub backend: BackendConfig,
    /// Where the session is persisted between runs
    pub session_file: PathBuf,
    /// Refresh the access token this many seconds before it expires
    pub refresh_leeway_secs: i64,
}

impl SessionGatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: BackendConfig::from_env(),
            session_file: env::var("AYVA_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            refresh_leeway_secs: env::var("AYVA_REFRESH_LEEWAY_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.refresh_leeway_secs),
        }
    }

    /// Refresh leeway, clamped to `0..=3600` seconds
    pub fn refresh_leeway(&self) -> Duration {
        Duration::seconds(self.refresh_leeway_secs.clamp(0, MAX_REFRESH_LEEWAY_SECS))
    }
}

impl Default for SessionGatewayConfig {
    fn default() -> Self {
        let home = env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."));
        Self {
            backend: BackendConfig::default(),
            session_file: home.join(".ayva").join("session.json"),
            refresh_leeway_secs: DEFAULT_REFRESH_LEEWAY_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_leeway_in_range() {
        let config = SessionGatewayConfig {
            refresh_leeway_secs: 30,
            ..SessionGatewayConfig::default()
        };
        assert_eq!(config.refresh_leeway(), Duration::seconds(30));
    }

    #[test]
    fn test_refresh_leeway_is_clamped() {
        let huge = SessionGatewayConfig {
            refresh_leeway_secs: i64::MAX,
            ..SessionGatewayConfig::default()
        };
        assert_eq!(huge.refresh_leeway(), Duration::seconds(MAX_REFRESH_LEEWAY_SECS));

        let negative = SessionGatewayConfig {
            refresh_leeway_secs: -5,
            ..SessionGatewayConfig::default()
        };
        assert_eq!(negative.refresh_leeway(), Duration::zero());
    }
}
