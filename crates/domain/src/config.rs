//! Configuration structures
//!
//! Every field has a default so a partial file (or no file at all) yields a
//! usable configuration. Loading and environment overrides live in
//! `vouch-infra`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_KEYCHAIN_SERVICE,
    DEFAULT_LOGIN_ENDPOINT, DEFAULT_REFRESH_ENDPOINT, LOGIN_ROUTE,
};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin every endpoint is joined to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Identity endpoint and navigation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Login endpoint, relative to `api.base_url`
    pub login_endpoint: String,
    /// Refresh endpoint, relative to `api.base_url`
    pub refresh_endpoint: String,
    /// Route the redirector navigates to when the session ends
    pub login_route: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            refresh_endpoint: DEFAULT_REFRESH_ENDPOINT.to_string(),
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

/// Durable token storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Keychain service name the token entries live under
    pub keychain_service: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string() }
    }
}

/// Join an endpoint onto a base URL with exactly one `/` between them.
#[must_use]
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}
