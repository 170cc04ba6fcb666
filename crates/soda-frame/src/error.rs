//! Error types for soda-frame

use thiserror::Error;

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Error types for frame operations
#[derive(Error, Debug)]
pub enum FrameError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Fetching the records failed
    #[error("Source error: {0}")]
    Source(#[from] soda_sources::SodaError),

    /// Missing column error
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Column has the wrong type for the operation
    #[error("Invalid column {column}: {reason}")]
    InvalidColumn { column: String, reason: String },

    /// Regex failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
