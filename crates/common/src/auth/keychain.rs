//! Keychain-backed [`CredentialStorage`]

use super::traits::CredentialStorage;
use crate::security::{KeychainError, KeychainProvider};

impl CredentialStorage for KeychainProvider {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self.get_secret(key) {
            Ok(value) => Ok(Some(value)),
            Err(KeychainError::NotFound) => Ok(None),
            Err(e) => Err(e.to_string()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.set_secret(key, value).map_err(|e| e.to_string())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.delete_secret(key).map_err(|e| e.to_string())
    }
}
