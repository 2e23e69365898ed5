//! Session types and wire bodies
//!
//! The identity API speaks JSON: login takes `{email, password}` and refresh
//! takes `{refresh}`; both answer with `{access, refresh?}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access and refresh credentials held for the current session
///
/// Both values are opaque bearer strings. A pair is always written and
/// cleared as a unit.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential attached to API calls
    pub access_token: String,

    /// Longer-lived credential used to mint new access tokens
    pub refresh_token: String,
}

impl TokenPair {
    /// Pair from an access and a refresh token
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Token response from the login and refresh endpoints
///
/// `refresh` is optional because refresh endpoints only send one back when
/// they rotate it.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "access_token")]
    pub access: String,
    #[serde(default, alias = "refresh_token")]
    pub refresh: Option<String>,
}

impl TokenResponse {
    /// Convert into a full pair, if the response carried both tokens.
    #[must_use]
    pub fn into_pair(self) -> Option<TokenPair> {
        match self.refresh {
            Some(refresh) if !self.access.is_empty() && !refresh.is_empty() => {
                Some(TokenPair::new(self.access, refresh))
            }
            _ => None,
        }
    }
}

/// Body of the login request
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of the refresh request
#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Authentication errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials rejected, or the login request could not be completed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The session could not be renewed and has been ended
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_tokens() {
        let pair = TokenPair::new("secret-access", "secret-refresh");
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn token_response_accepts_both_field_spellings() {
        let short: TokenResponse =
            serde_json::from_str(r#"{"access":"a1","refresh":"r1"}"#).unwrap();
        let long: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a1","refresh_token":"r1"}"#).unwrap();

        assert_eq!(short.into_pair(), Some(TokenPair::new("a1", "r1")));
        assert_eq!(long.into_pair(), Some(TokenPair::new("a1", "r1")));
    }

    #[test]
    fn access_only_response_is_not_a_pair() {
        let response: TokenResponse = serde_json::from_str(r#"{"access":"a2"}"#).unwrap();
        assert_eq!(response.refresh, None);
        assert_eq!(response.into_pair(), None);
    }
}
