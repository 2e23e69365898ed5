//! Platform credential storage
//!
//! Wraps the OS keychain (macOS Keychain Access, Windows Credential Manager,
//! Linux Secret Service) for persisting session secrets.

pub mod keychain;

pub use keychain::{KeychainError, KeychainProvider};
