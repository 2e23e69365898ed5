//! Shared client building blocks for the Vouch crates.
//!
//! # Modules
//!
//! - [`auth`]: token storage, credential decoding, login/refresh, navigation
//!   redirects and route guarding
//! - `security` (feature `platform`): platform keychain access used as the
//!   durable token backend
//! - `testing` (feature `test-utils`): in-memory storage and navigation mocks

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use auth::{AuthClient, AuthError, NavigationRedirector, TokenPair, TokenStore};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider};
