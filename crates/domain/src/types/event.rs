//! Event and review wire types
//!
//! Field names follow the remote API (`imageURL`, `startTime`, ...). Optional
//! fields that are missing or `null` fall back to empty text and zero, the
//! way the listing pages display them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use crate::errors::{Result, VouchError};

/// Event as returned by `GET events/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    /// Creator's user id
    #[serde(default)]
    pub user: Option<i64>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    /// ISO-8601 start time as sent by the server
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Average review rating
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(rename = "reviewCount", default, deserialize_with = "null_as_default")]
    pub review_count: u32,
}

/// Payload of `GET events/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsListing {
    #[serde(default)]
    pub upcoming: Vec<EventSummary>,
    #[serde(default)]
    pub past: Vec<EventSummary>,
}

/// A review attached to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST events/{id}/reviews/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// Unvalidated review; see [`validated`](Self::validated)
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self { rating, comment: comment.into() }
    }

    /// Check the rating range and comment, returning the trimmed review.
    ///
    /// # Errors
    /// Returns `VouchError::InvalidInput` when no rating was selected, the
    /// rating is out of range, or the comment is blank.
    pub fn validated(self) -> Result<Self> {
        if self.rating == 0 {
            return Err(VouchError::InvalidInput("Please select rating first".to_string()));
        }
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&self.rating) {
            return Err(VouchError::InvalidInput(format!(
                "rating must be between {MIN_REVIEW_RATING} and {MAX_REVIEW_RATING}"
            )));
        }

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(VouchError::InvalidInput("Please write a comment".to_string()));
        }

        Ok(Self { rating: self.rating, comment: comment.to_string() })
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
