//! Configuration loader
//!
//! Loads client configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Start from a config file if one is found (explicit path or probed),
//!    otherwise from [`Config::default`]
//! 2. Fields missing from the file keep their defaults
//! 3. Environment variables override whatever the file said
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `VOUCH_API_BASE_URL`: API base URL
//! - `VOUCH_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `VOUCH_LOGIN_ENDPOINT`: Login endpoint, relative to the base URL
//! - `VOUCH_REFRESH_ENDPOINT`: Refresh endpoint, relative to the base URL
//! - `VOUCH_LOGIN_ROUTE`: Screen route forced logouts navigate to
//! - `VOUCH_KEYCHAIN_SERVICE`: Keychain service name for stored tokens
//!
//! ## File Locations
//! The loader probes the following names, in order, in the current working
//! directory, its parent, and next to the executable:
//! `vouch.toml`, `vouch.json`, `config.toml`, `config.json`

use std::path::{Path, PathBuf};

use vouch_domain::{Config, Result, VouchError};

const CONFIG_FILE_NAMES: [&str; 4] = ["vouch.toml", "vouch.json", "config.toml", "config.json"];

/// Load configuration: probed file (or defaults), then environment overrides
///
/// # Errors
/// Returns `VouchError::Config` if a config file exists but cannot be read or
/// parsed, or an environment override has an invalid value.
pub fn load() -> Result<Config> {
    let config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(config)
}

/// Load configuration from defaults plus environment variables only
///
/// # Errors
/// Returns `VouchError::Config` if an environment variable has an invalid
/// value.
pub fn load_from_env() -> Result<Config> {
    apply_env_overrides(Config::default())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for config files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `VouchError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VouchError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VouchError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VouchError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Apply `VOUCH_*` environment overrides on top of `config`
///
/// # Errors
/// Returns `VouchError::Config` if `VOUCH_API_TIMEOUT_SECS` is not a positive
/// integer.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(base_url) = env_var("VOUCH_API_BASE_URL") {
        config.api.base_url = base_url;
    }
    if let Some(timeout) = env_var("VOUCH_API_TIMEOUT_SECS") {
        config.api.timeout_seconds = timeout
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| VouchError::Config(format!("Invalid request timeout: {timeout}")))?;
    }
    if let Some(endpoint) = env_var("VOUCH_LOGIN_ENDPOINT") {
        config.auth.login_endpoint = endpoint;
    }
    if let Some(endpoint) = env_var("VOUCH_REFRESH_ENDPOINT") {
        config.auth.refresh_endpoint = endpoint;
    }
    if let Some(route) = env_var("VOUCH_LOGIN_ROUTE") {
        config.auth.login_route = route;
    }
    if let Some(service) = env_var("VOUCH_KEYCHAIN_SERVICE") {
        config.storage.keychain_service = service;
    }

    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VouchError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VouchError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(VouchError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    first_existing(&dirs)
}

fn first_existing(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
