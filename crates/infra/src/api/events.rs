//! Event and review endpoints
//!
//! Typed wrappers over [`ApiClient`] for the calls the event pages make.
//! Non-2xx answers become [`ApiError::Status`] carrying the response body.

use std::sync::Arc;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};
use vouch_common::auth::logged_in_user_id;
use vouch_domain::{EventSummary, EventsListing, NewReview, Review, UserId};

use super::client::ApiClient;
use super::errors::ApiError;

/// Client for the `events/` endpoints
pub struct EventsApi {
    client: Arc<ApiClient>,
}

impl EventsApi {
    /// Events endpoints over an authenticated client
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Upcoming and past events
    ///
    /// # Errors
    /// Returns `ApiError::Status` on a non-2xx answer, `ApiError::Decode` if
    /// the listing cannot be parsed
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<EventsListing, ApiError> {
        let response = self.client.get("events/").await?;
        let listing: EventsListing = read_json(response).await?;

        debug!(upcoming = listing.upcoming.len(), past = listing.past.len(), "Events loaded");
        Ok(listing)
    }

    /// Reviews of one event
    ///
    /// The endpoint answers either with a bare array or with
    /// `{ "reviews": [...] }`; anything else is treated as no reviews.
    ///
    /// # Errors
    /// Returns `ApiError::Status` on a non-2xx answer, `ApiError::Decode` if
    /// a review cannot be parsed
    #[instrument(skip(self))]
    pub async fn event_reviews(&self, event_id: i64) -> Result<Vec<Review>, ApiError> {
        let response = self.client.get(&format!("events/{event_id}/reviews/")).await?;
        reviews_from_value(read_json(response).await?)
    }

    /// Post a review for an event
    ///
    /// The review is validated (rating selected and in range, comment not
    /// blank) before anything is sent; the comment is sent trimmed.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidInput` for an invalid review, otherwise as
    /// for [`list_events`](Self::list_events)
    #[instrument(skip(self, review), fields(rating = review.rating))]
    pub async fn submit_review(
        &self,
        event_id: i64,
        review: NewReview,
    ) -> Result<Review, ApiError> {
        let review = review.validated()?;

        let response =
            self.client.post_json(&format!("events/{event_id}/reviews/"), &review).await?;
        let created: Review = read_json(response).await?;

        info!(review_id = created.id, "Review submitted");
        Ok(created)
    }

    /// Delete one of the logged-in user's reviews
    ///
    /// # Errors
    /// Returns `ApiError::Status` on a non-2xx answer
    #[instrument(skip(self))]
    pub async fn delete_review(&self, event_id: i64, review_id: i64) -> Result<(), ApiError> {
        let response =
            self.client.delete(&format!("events/{event_id}/reviews/{review_id}/delete/")).await?;
        ensure_success(response).await?;

        info!("Review deleted");
        Ok(())
    }

    /// Cancel an event the logged-in user created
    ///
    /// # Errors
    /// Returns `ApiError::Status` on a non-2xx answer
    #[instrument(skip(self))]
    pub async fn cancel_event(&self, event_id: i64) -> Result<(), ApiError> {
        let response = self.client.delete(&format!("events/{event_id}/delete/")).await?;
        ensure_success(response).await?;

        info!("Event cancelled");
        Ok(())
    }

    /// Whether the logged-in user created `event`
    #[must_use]
    pub fn is_own_event(&self, event: &EventSummary) -> bool {
        is_creator(event, logged_in_user_id(self.client.store()).as_ref())
    }
}

/// Whether `identity` is the creator of `event`
///
/// Identities are compared numerically, so a `sub` claim of `"9"` matches a
/// creator id of `9`.
#[must_use]
pub fn is_creator(event: &EventSummary, identity: Option<&UserId>) -> bool {
    match (event.user, identity) {
        (Some(creator), Some(identity)) => identity.matches(creator),
        _ => false,
    }
}

fn reviews_from_value(value: Value) -> Result<Vec<Review>, ApiError> {
    let list = match value {
        list @ Value::Array(_) => list,
        Value::Object(mut body) => match body.remove("reviews") {
            Some(reviews @ Value::Array(_)) => reviews,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    serde_json::from_value(list).map_err(|e| ApiError::Decode(format!("invalid review: {e}")))
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read response: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}
