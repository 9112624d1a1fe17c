//! Error types for repository access.

use thiserror::Error;

/// Errors that can occur while talking to the repository.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Base URL or record path could not be turned into a URL.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Authentication was rejected or returned no session.
    #[error("login failed for user '{username}': {message}")]
    Login { username: String, message: String },

    /// Non-success response from the API.
    #[error("repository API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl ClientError {
    /// Whether the whole run should stop rather than just the current item.
    #[must_use]
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. } | Self::Login { .. } | Self::Api { status: 401 | 403, .. }
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_is_run_fatal() {
        let err = ClientError::Api {
            status: 403,
            message: "Access denied".to_string(),
        };
        assert!(err.is_run_fatal());
        let err = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_run_fatal());
        assert!(!ClientError::Network("reset".to_string()).is_run_fatal());
    }
}
