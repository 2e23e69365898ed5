//! Mock implementations of the auth seams
//!
//! Provides mock objects for testing purposes.

#![allow(clippy::missing_errors_doc)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::auth::{CredentialStorage, NavigateHandle, NavigateOptions};

type StorageData = Arc<Mutex<HashMap<String, String>>>;
type NavigationLog = Arc<Mutex<Vec<(String, NavigateOptions)>>>;

/// In-memory [`CredentialStorage`]
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what the token store persisted.
///
/// # Examples
///
/// ```
/// use vouch_common::auth::CredentialStorage;
/// use vouch_common::testing::MockCredentialStorage;
///
/// let storage = MockCredentialStorage::new();
/// storage.set("access", "a1").unwrap();
/// assert_eq!(storage.get("access").unwrap(), Some("a1".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCredentialStorage {
    data: StorageData,
    unavailable: bool,
}

impl MockCredentialStorage {
    /// Create a new, empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every operation fails, like a locked keychain
    pub fn unavailable() -> Self {
        Self { data: StorageData::default(), unavailable: true }
    }

    /// Storage pre-populated with `entries`
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        storage
            .data
            .lock()
            .extend(entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        storage
    }

    /// Raw entry, bypassing the availability switch
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<String> {
        self.data.lock().get(key).cloned()
    }

    /// Whether no entries are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    fn check_available(&self) -> Result<(), String> {
        if self.unavailable {
            Err("credential storage unavailable".to_string())
        } else {
            Ok(())
        }
    }
}

impl CredentialStorage for MockCredentialStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check_available()?;
        Ok(self.data.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.check_available()?;
        self.data.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.check_available()?;
        self.data.lock().remove(key);
        Ok(())
    }
}

/// Navigation function that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    calls: NavigationLog,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to bind into a [`NavigationRedirector`](crate::auth::NavigationRedirector)
    #[must_use]
    pub fn handle(&self) -> NavigateHandle {
        let calls = self.calls.clone();
        Arc::new(move |route: &str, options: NavigateOptions| {
            calls.lock().push((route.to_string(), options));
        })
    }

    /// Every `(route, options)` pair received, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<(String, NavigateOptions)> {
        self.calls.lock().clone()
    }

    /// Routes received, oldest first
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(route, _)| route.clone()).collect()
    }
}
