//! Domain types and models

pub mod event;
pub mod user;

pub use event::{EventSummary, EventsListing, NewReview, Review};
pub use user::UserId;
