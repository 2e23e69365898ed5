//! # Vouch Domain
//!
//! Domain types and models shared by the Vouch client crates.
//!
//! This crate contains:
//! - Wire types for events, reviews and user identities
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (endpoints, routes, storage keys)
//!
//! ## Architecture
//! - No dependencies on other Vouch crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
