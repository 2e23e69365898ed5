//! Unverified claims read from the access token
//!
//! The payload segment of the JWT is decoded **without** checking the
//! signature. The result is good for optimistic UI (showing who is logged in,
//! deciding whether to offer the "cancel event" button) and nothing else; the
//! server remains the only authority on what the token permits.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use vouch_domain::constants::USER_ID_CLAIMS;
use vouch_domain::UserId;

use super::token_store::TokenStore;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Why a token could not be read
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedToken {
    #[error("expected 3 dot-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("payload is not valid base64: {0}")]
    Base64(String),

    #[error("payload is not valid JSON: {0}")]
    Json(String),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Decode the payload segment of `token` into its claims object.
///
/// # Errors
/// Returns [`MalformedToken`] describing the first decoding step that failed.
pub fn read_unverified_claims(token: &str) -> Result<Map<String, Value>, MalformedToken> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(MalformedToken::SegmentCount(segments.len()));
    }

    let payload = segments[1];
    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|e| MalformedToken::Base64(e.to_string()))?;

    match serde_json::from_slice(&bytes).map_err(|e| MalformedToken::Json(e.to_string()))? {
        Value::Object(claims) => Ok(claims),
        _ => Err(MalformedToken::NotAnObject),
    }
}

/// User id carried by `token`, or `None` if the token cannot be read.
///
/// Claims are consulted in the order `user_id`, `id`, `sub`; empty strings,
/// zero, `false` and `null` count as missing.
#[must_use]
pub fn user_id_from_token(token: &str) -> Option<UserId> {
    let claims = match read_unverified_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable access token");
            return None;
        }
    };

    USER_ID_CLAIMS.iter().find_map(|name| claims.get(*name).and_then(identity_from_claim))
}

/// Identity of the logged-in user, derived from the stored access token.
#[must_use]
pub fn logged_in_user_id(store: &TokenStore) -> Option<UserId> {
    store.access_token().as_deref().and_then(user_id_from_token)
}

fn identity_from_claim(value: &Value) -> Option<UserId> {
    match value {
        Value::Number(n) => {
            if n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()) {
                return None;
            }
            Some(n.as_i64().map_or_else(|| UserId::Text(n.to_string()), UserId::Number))
        }
        Value::String(s) if !s.is_empty() => Some(UserId::Text(s.clone())),
        _ => None,
    }
}
