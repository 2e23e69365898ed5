//! API-specific error types
//!
//! Provides error classification for calls made through the authenticated
//! fetch layer.

use reqwest::StatusCode;
use thiserror::Error;
use vouch_domain::VouchError;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401/403 that survived the refresh-and-retry
    Authentication,
    /// Other 4xx, bad input, undecodable responses
    Client,
    /// 5xx
    Server,
    /// Transport failures
    Network,
    /// Misconfiguration or internal failures
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                ApiErrorCategory::Authentication
            }
            Self::Status { status, .. } if status.is_server_error() => ApiErrorCategory::Server,
            Self::Status { .. } | Self::Decode(_) | Self::InvalidInput(_) => {
                ApiErrorCategory::Client
            }
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Config(_) | Self::Internal(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<VouchError> for ApiError {
    fn from(err: VouchError) -> Self {
        match err {
            VouchError::Network(message) => Self::Network(message),
            VouchError::InvalidInput(message) => Self::InvalidInput(message),
            VouchError::Config(message) => Self::Config(message),
            VouchError::Auth(message)
            | VouchError::Storage(message)
            | VouchError::Internal(message) => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(status(401).category(), ApiErrorCategory::Authentication);
        assert_eq!(status(403).category(), ApiErrorCategory::Authentication);
        assert_eq!(status(404).category(), ApiErrorCategory::Client);
        assert_eq!(status(502).category(), ApiErrorCategory::Server);
        assert_eq!(ApiError::Network("reset".into()).category(), ApiErrorCategory::Network);
        assert_eq!(ApiError::Decode("eof".into()).category(), ApiErrorCategory::Client);
    }

    #[test]
    fn test_from_domain_error() {
        assert!(matches!(
            ApiError::from(VouchError::InvalidInput("Please write a comment".into())),
            ApiError::InvalidInput(msg) if msg == "Please write a comment"
        ));
        assert!(matches!(
            ApiError::from(VouchError::Network("refused".into())),
            ApiError::Network(_)
        ));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(status(500).status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(ApiError::Config("x".into()).status(), None);
    }
}
