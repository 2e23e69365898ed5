//! User identity types
//!
//! The identity is read out of the access token payload for display purposes
//! only; it is never an authorization decision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the logged-in user as found in the token claims
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    /// Numeric form of the identifier, if it has one.
    ///
    /// Text identifiers that spell an integer (`"42"`) convert as well.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Whether this identity is the numeric user id `other`.
    #[must_use]
    pub fn matches(&self, other: i64) -> bool {
        self.as_number() == Some(other)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_matches_number() {
        assert!(UserId::Number(42).matches(42));
        assert!(UserId::from("42").matches(42));
        assert!(!UserId::from("u7").matches(7));
        assert_eq!(UserId::from("u7").as_number(), None);
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(UserId::Number(9).to_string(), "9");
        assert_eq!(UserId::from("u7").to_string(), "u7");
    }
}
