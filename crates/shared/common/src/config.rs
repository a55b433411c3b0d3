//! Shared configuration structures.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hosted backend connection settings shared by the auth and data clients.
#[derive(Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the hosted project (e.g., "https://xyz.supabase.co")
    pub url: String,
    /// Public (anon) API key sent with every request
    #[serde(skip_serializing)]
    pub anon_key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl BackendConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("SUPABASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.url),
            anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or(defaults.anon_key),
        }
    }

    /// Auth API endpoint for `path` (e.g., "token")
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    /// Data API endpoint for `table`
    pub fn rest_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table.trim_start_matches('/'))
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
        }
    }
}

/// Post-success redirect delays used by the views.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Login success → Home
    pub login_redirect_ms: u64,
    /// Listing created → Home
    pub create_redirect_ms: u64,
    /// Profile saved → Profile
    pub profile_redirect_ms: u64,
}

impl UiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login_redirect_ms: env_millis("AYVA_LOGIN_REDIRECT_MS", defaults.login_redirect_ms),
            create_redirect_ms: env_millis("AYVA_CREATE_REDIRECT_MS", defaults.create_redirect_ms),
            profile_redirect_ms: env_millis(
                "AYVA_PROFILE_REDIRECT_MS",
                defaults.profile_redirect_ms,
            ),
        }
    }

    /// No delays; used by tests and scripted runs
    pub fn immediate() -> Self {
        Self {
            login_redirect_ms: 0,
            create_redirect_ms: 0,
            profile_redirect_ms: 0,
        }
    }

    pub fn login_redirect(&self) -> Duration {
        Duration::from_millis(self.login_redirect_ms)
    }

    pub fn create_redirect(&self) -> Duration {
        Duration::from_millis(self.create_redirect_ms)
    }

    pub fn profile_redirect(&self) -> Duration {
        Duration::from_millis(self.profile_redirect_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            login_redirect_ms: 1500,
            create_redirect_ms: 2000,
            profile_redirect_ms: 1500,
        }
    }
}

fn env_millis(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
