//! Authenticated access to the Vouch API
//!
//! # Architecture
//!
//! - [`ApiClient`] attaches the bearer token and performs the one-shot
//!   refresh-and-retry on 401, delegating the refresh to a
//!   [`TokenRefresher`](vouch_common::auth::TokenRefresher)
//! - [`EventsApi`] wraps the event and review endpoints
//! - Requests are sent once by the underlying [`HttpClient`](crate::http::HttpClient);
//!   there is no automatic retry besides the 401 replay

pub mod client;
pub mod errors;
pub mod events;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, ApiRequest};
pub use errors::{ApiError, ApiErrorCategory};
pub use events::{is_creator, EventsApi};
