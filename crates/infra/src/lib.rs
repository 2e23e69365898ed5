//! # Vouch Infrastructure
//!
//! I/O-bound building blocks of the Vouch client.
//!
//! This crate contains:
//! - Authenticated fetch with refresh-and-retry and the events API
//! - HTTP client construction
//! - Configuration loading
//! - Logging setup
//! - The [`Session`] composition root
//!
//! ## Architecture
//! - Depends on `vouch-common` (auth) and `vouch-domain` (types, config)
//! - Contains the network and filesystem code

pub mod api;
pub mod config;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiRequest, EventsApi};
pub use http::HttpClient;
pub use observability::{init_tracing, LogFormat};
pub use session::Session;
