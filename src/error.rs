//! Error types for media-flow

use crate::submit::SubmissionStage;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the submission flow and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// Operation is not allowed in the current stage
    #[error("cannot {operation} while {stage}")]
    InvalidState {
        /// Name of the rejected operation
        operation: &'static str,
        /// Stage the coordinator was in
        stage: SubmissionStage,
    },

    /// Tried to advance with nothing selected
    #[error("no media selected")]
    EmptySelection,

    /// Selection exceeds the configured limit
    #[error("too many items selected: {got} (max {max})")]
    TooManyItems {
        /// Configured maximum
        max: usize,
        /// Number of items offered
        got: usize,
    },

    /// File type is neither a supported image nor video
    #[error("unsupported media type: {}", .0.display())]
    UnsupportedMedia(PathBuf),

    /// Picked file does not exist
    #[error("media not found: {}", .0.display())]
    MediaNotFound(PathBuf),

    /// Authentication is missing or invalid
    #[error("authentication error: {0}")]
    Auth(String),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Reservation service rejected the request or replied with garbage
    #[error("reservation failed: {0}")]
    Reservation(String),

    /// Reservation service answered with a retryable status
    #[error("reservation service unavailable (HTTP {0})")]
    ServiceUnavailable(u16),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceUnavailable(_) => true,
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

/// Result alias for media-flow operations
pub type Result<T> = std::result::Result<T, Error>;
