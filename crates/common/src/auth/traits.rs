//! Traits for credential storage and token refresh
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (system keychain, identity API).

use async_trait::async_trait;

use super::types::AuthError;

/// Trait for durable credential storage
///
/// Backends hold named string entries that survive process restarts. Errors
/// are reported as strings; the token store logs them and carries on.
pub trait CredentialStorage: Send + Sync {
    /// Read an entry
    ///
    /// # Returns
    /// `Ok(None)` when the entry does not exist
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Create or overwrite an entry
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Remove an entry (idempotent)
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached
    fn delete(&self, key: &str) -> Result<(), String>;
}

/// Trait for renewing the access token after the API rejected it
///
/// Implemented by [`AuthClient`](super::AuthClient); the authenticated fetch
/// layer depends only on this trait.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Obtain a usable access token after `rejected` got a 401
    ///
    /// # Arguments
    /// * `rejected` - Access token the failed request carried, if any
    ///
    /// # Errors
    /// Returns `AuthError::RefreshFailed` if the session cannot be renewed
    async fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<String, AuthError>;
}
