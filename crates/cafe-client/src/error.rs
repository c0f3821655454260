//! # Client Error Types
//!
//! Error types for backend communication.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidBaseUrl │  │  Connection     │  │  UnexpectedStatus       │ │
//! │  │  ConfigLoad     │  │  Timeout        │  │  DecodeFailed           │ │
//! │  │  ConfigSave     │  │  RequestFailed  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering config and HTTP failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Base URL could not be parsed.
    #[error("Invalid backend base URL: {0}")]
    InvalidBaseUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the backend.
    #[error("Connection to backend failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("Backend request timed out")]
    Timeout,

    /// Request failed for another transport-level reason.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The backend answered with a non-success status.
    #[error("Backend returned {status} for {path}: {body}")]
    UnexpectedStatus {
        status: u16,
        path: String,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    DecodeFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ClientError::DecodeFailed(err.to_string())
        } else {
            ClientError::RequestFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidBaseUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DecodeFailed(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if retrying the same request from scratch could
    /// succeed. Nothing in this crate retries automatically - every
    /// failure surfaces to the user - but the caller can use this to
    /// phrase the message.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ConnectionFailed(_) | ClientError::Timeout => true,
            ClientError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidBaseUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::ConnectionFailed("refused".into()).is_retryable());
        assert!(ClientError::Timeout.is_retryable());
        assert!(ClientError::UnexpectedStatus {
            status: 503,
            path: "/api/gangbung/ingredients".into(),
            body: "unavailable".into(),
        }
        .is_retryable());

        assert!(!ClientError::UnexpectedStatus {
            status: 404,
            path: "/api/gangbung/menu".into(),
            body: "not found".into(),
        }
        .is_retryable());
        assert!(!ClientError::InvalidBaseUrl("nope".into()).is_retryable());
        assert!(!ClientError::DecodeFailed("bad json".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::UnexpectedStatus {
            status: 500,
            path: "/api/gangbung/order".into(),
            body: "boom".into(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("/api/gangbung/order"));
    }
}
