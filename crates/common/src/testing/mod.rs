//! Testing utilities and helpers
//!
//! - **[`mocks`]**: in-memory credential storage and a recording navigator
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vouch_common::auth::{NavigationRedirector, TokenPair, TokenStore};
//! use vouch_common::testing::{MockCredentialStorage, RecordingNavigator};
//!
//! let store = TokenStore::load(Arc::new(MockCredentialStorage::new()));
//! store.set_tokens(TokenPair::new("access", "refresh"));
//!
//! let navigator = RecordingNavigator::new();
//! let redirector = NavigationRedirector::new();
//! redirector.set_navigate_handle(navigator.handle());
//! redirector.redirect_to_login();
//! assert_eq!(navigator.routes(), vec!["/loginsignup".to_string()]);
//! ```

pub mod mocks;

pub use mocks::{MockCredentialStorage, RecordingNavigator};
