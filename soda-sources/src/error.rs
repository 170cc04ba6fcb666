//! Error types for soda-sources

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SodaError {
    /// Connection, DNS, timeout or body read failure.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The remote answered with a status >= 400.
    #[error("Remote error: HTTP {status} - {body}")]
    RemoteError { status: u16, body: String },

    /// The response body is not the expected shape.
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SodaError {
    /// Status code of a [`SodaError::RemoteError`].
    pub fn status(&self) -> Option<u16> {
        match self {
            SodaError::RemoteError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Socrata reports failures as `{"code": ..., "message": ...}`. Returns the
    /// `message` field when the body has that shape.
    pub fn message(&self) -> Option<String> {
        match self {
            SodaError::RemoteError { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()?
                .get("message")?
                .as_str()
                .map(str::to_string),
            _ => None,
        }
    }

    /// Whether a bounded retry may re-attempt the request.
    pub fn is_retryable(&self) -> bool {
        match self {
            SodaError::TransportError(_) => true,
            SodaError::RemoteError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SodaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SodaError::DecodeError(err.to_string())
        } else {
            SodaError::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SodaError {
    fn from(err: serde_json::Error) -> Self {
        SodaError::DecodeError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SodaError>;
