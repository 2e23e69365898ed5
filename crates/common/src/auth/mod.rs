//! Authenticated session infrastructure
//!
//! This module owns everything the client needs to hold a session with the
//! Vouch API: where the tokens live, how they are obtained and renewed, and
//! how the UI is told that the session is over.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AuthClient    │  login / refresh / logout against the identity API
//! └────────┬────────┘
//!          │
//!          ├──► TokenStore            (current TokenPair, shared)
//!          │         │
//!          │         └──► CredentialStorage  (durable backend: keychain, mock)
//!          │
//!          └──► NavigationRedirector  (forced return to the login route)
//!
//! claims::logged_in_user_id ──► TokenStore   (display-only identity)
//! RouteGuard                ──► TokenStore   (allow / redirect decision)
//! ```
//!
//! # Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use vouch_common::auth::{
//!     claims, AuthClient, AuthClientConfig, NavigationRedirector, TokenStore,
//! };
//! use vouch_common::testing::MockCredentialStorage;
//! use vouch_domain::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let store = Arc::new(TokenStore::load(Arc::new(MockCredentialStorage::new())));
//!     let redirector = Arc::new(NavigationRedirector::new());
//!
//!     let auth = AuthClient::new(AuthClientConfig::from_config(&config), store.clone(), redirector)?;
//!     auth.login("student@iitb.ac.in", "hunter2").await?;
//!
//!     if let Some(user) = claims::logged_in_user_id(&store) {
//!         println!("logged in as {user}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: `TokenPair`, wire request/response bodies, `AuthError`
//! - **[`traits`]**: `CredentialStorage` and `TokenRefresher` seams
//! - **[`token_store`]**: shared, persisted token state
//! - **[`claims`]**: unverified identity read from the access token
//! - **[`client`]**: login, single-flight refresh and session teardown
//! - **[`redirect`]**: late-bound navigation handle
//! - **[`guard`]**: route guarding for protected screens

pub mod claims;
pub mod client;
pub mod guard;
#[cfg(feature = "platform")]
mod keychain;
pub mod redirect;
pub mod token_store;
pub mod traits;
pub mod types;

// Re-export commonly used types and functions
pub use claims::{logged_in_user_id, read_unverified_claims, user_id_from_token, MalformedToken};
pub use client::{AuthClient, AuthClientConfig};
pub use guard::{GuardDecision, RouteGuard};
pub use redirect::{NavigateHandle, NavigateOptions, NavigationRedirector};
pub use token_store::TokenStore;
pub use traits::{CredentialStorage, TokenRefresher};
pub use types::{AuthError, TokenPair, TokenResponse};
