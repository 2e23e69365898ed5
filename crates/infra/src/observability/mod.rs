//! Logging setup
//!
//! Installs the global `tracing` subscriber. Filtering follows `RUST_LOG`
//! (default `info`); output is human-readable text or one JSON object per
//! line.

use std::str::FromStr;

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;
use vouch_domain::{Result, VouchError};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Format named by `VOUCH_LOG_FORMAT`, text when unset or unrecognised
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("VOUCH_LOG_FORMAT").ok().and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for LogFormat {
    type Err = VouchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(VouchError::Config(format!("Unknown log format: {other}"))),
        }
    }
}

/// Install the global subscriber
///
/// # Errors
/// Returns `VouchError::Config` if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Json => fmt::fmt().with_env_filter(filter).json().try_init(),
        LogFormat::Text => fmt::fmt().with_env_filter(filter).try_init(),
    };

    installed.map_err(|e| VouchError::Config(format!("Failed to install tracing subscriber: {e}")))
}
