//! Shared token state with durable persistence
//!
//! Holds the current access/refresh tokens in memory and mirrors every write
//! to a [`CredentialStorage`] backend so a restarted client picks the session
//! back up. Storage failures never reach callers: writes keep the in-memory
//! value and log a warning, unreadable entries load as absent.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use vouch_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

use super::traits::CredentialStorage;
use super::types::TokenPair;

#[derive(Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

/// Token store shared by the auth client and the API client
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    slots: RwLock<Slots>,
}

impl TokenStore {
    /// Create a store backed by `storage`, loading any persisted tokens
    #[must_use]
    pub fn load(storage: Arc<dyn CredentialStorage>) -> Self {
        let slots = Slots {
            access: read_entry(storage.as_ref(), ACCESS_TOKEN_KEY),
            refresh: read_entry(storage.as_ref(), REFRESH_TOKEN_KEY),
        };

        if slots.access.is_some() {
            info!("Token store initialized with persisted tokens");
        } else {
            debug!("No persisted tokens found");
        }

        Self { storage, slots: RwLock::new(slots) }
    }

    /// Current access token
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.slots.read().access.clone()
    }

    /// Current refresh token
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.slots.read().refresh.clone()
    }

    /// Whether an access token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slots.read().access.is_some()
    }

    /// Replace both tokens
    pub fn set_tokens(&self, pair: TokenPair) {
        let mut slots = self.slots.write();
        write_entry(self.storage.as_ref(), ACCESS_TOKEN_KEY, &pair.access_token);
        write_entry(self.storage.as_ref(), REFRESH_TOKEN_KEY, &pair.refresh_token);
        slots.access = Some(pair.access_token);
        slots.refresh = Some(pair.refresh_token);

        debug!("Tokens stored");
    }

    /// Replace the access token after a refresh
    ///
    /// `rotated_refresh` replaces the refresh token when the endpoint issued
    /// a new one; otherwise the current refresh token is kept.
    pub fn update_access_token(&self, access_token: String, rotated_refresh: Option<String>) {
        let mut slots = self.slots.write();
        write_entry(self.storage.as_ref(), ACCESS_TOKEN_KEY, &access_token);
        slots.access = Some(access_token);

        if let Some(refresh) = rotated_refresh {
            write_entry(self.storage.as_ref(), REFRESH_TOKEN_KEY, &refresh);
            slots.refresh = Some(refresh);
            debug!("Access token updated, refresh token rotated");
        } else {
            debug!("Access token updated");
        }
    }

    /// Remove both tokens from memory and storage
    pub fn clear_tokens(&self) {
        let mut slots = self.slots.write();
        delete_entry(self.storage.as_ref(), ACCESS_TOKEN_KEY);
        delete_entry(self.storage.as_ref(), REFRESH_TOKEN_KEY);
        *slots = Slots::default();

        info!("Tokens cleared");
    }
}

fn read_entry(storage: &dyn CredentialStorage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!(key = %key, error = %e, "Token storage unavailable, treating entry as absent");
            None
        }
    }
}

fn write_entry(storage: &dyn CredentialStorage, key: &str, value: &str) {
    if let Err(e) = storage.set(key, value) {
        warn!(key = %key, error = %e, "Failed to persist token, keeping it in memory only");
    }
}

fn delete_entry(storage: &dyn CredentialStorage, key: &str) {
    if let Err(e) = storage.delete(key) {
        warn!(key = %key, error = %e, "Failed to remove persisted token");
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::token_store.
    use super::*;
    use crate::testing::MockCredentialStorage;

    fn empty_store() -> (Arc<MockCredentialStorage>, TokenStore) {
        let storage = Arc::new(MockCredentialStorage::new());
        let store = TokenStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn set_then_get_returns_exact_pair() {
        let (_, store) = empty_store();

        store.set_tokens(TokenPair::new("a1", "r1"));

        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn clear_removes_both_tokens() {
        let (storage, store) = empty_store();
        store.set_tokens(TokenPair::new("a1", "r1"));

        store.clear_tokens();

        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn tokens_survive_reload() {
        let (storage, store) = empty_store();
        store.set_tokens(TokenPair::new("a1", "r1"));
        drop(store);

        let reloaded = TokenStore::load(storage);
        assert_eq!(reloaded.access_token().as_deref(), Some("a1"));
        assert_eq!(reloaded.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn set_overwrites_previous_pair() {
        let (_, store) = empty_store();
        store.set_tokens(TokenPair::new("a1", "r1"));
        store.set_tokens(TokenPair::new("a2", "r2"));

        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r2"));
    }

    #[test]
    fn update_keeps_refresh_unless_rotated() {
        let (storage, store) = empty_store();
        store.set_tokens(TokenPair::new("a1", "r1"));

        store.update_access_token("a2".to_string(), None);
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));

        store.update_access_token("a3".to_string(), Some("r3".to_string()));
        assert_eq!(store.refresh_token().as_deref(), Some("r3"));
        assert_eq!(storage.entry(REFRESH_TOKEN_KEY).as_deref(), Some("r3"));
    }

    #[test]
    fn unavailable_storage_reads_absent_and_keeps_memory() {
        let store = TokenStore::load(Arc::new(MockCredentialStorage::unavailable()));
        assert_eq!(store.access_token(), None);

        store.set_tokens(TokenPair::new("a1", "r1"));
        assert_eq!(store.access_token().as_deref(), Some("a1"));

        store.clear_tokens();
        assert_eq!(store.access_token(), None);
    }
}
