//! Error types for Transition Assist.

use serde_json::Value;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A backend call failed — the transport broke or the backend rejected the
/// request with a non-success status.
///
/// Never retried or downgraded; callers surface it as-is.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced an HTTP response, or the response body
    /// could not be read as JSON.
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The backend answered with a non-2xx status. `detail` holds the error
    /// body parsed as JSON when possible, the raw text otherwise.
    #[error("backend returned {status} for {endpoint}: {detail}")]
    Rejected {
        endpoint: String,
        status: u16,
        detail: Value,
    },
}

impl BackendError {
    /// HTTP status of the failure, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Rejected { status, .. } => Some(*status),
        }
    }

    /// The endpoint the failed request was addressed to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. } | Self::Rejected { endpoint, .. } => endpoint,
        }
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
