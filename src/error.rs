//! Crate-wide error type for content source and assembly failures

use thiserror::Error;

/// Result type alias for copydesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the content source and the assembly pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// The source could not be reached or the query failed outright.
    /// Never retried locally; callers decide what to do.
    #[error("content source unavailable: {0}")]
    SourceUnavailable(String),

    /// No post matches the requested slug.
    #[error("no post found for slug '{0}'")]
    NotFound(String),

    /// A document's data payload could not be shaped into content models.
    #[error("malformed content in document '{uid}': {reason}")]
    MalformedContent { uid: String, reason: String },
}

impl Error {
    /// Create a `SourceUnavailable` from any displayable cause
    pub fn unavailable<T: ToString>(cause: T) -> Self {
        Self::SourceUnavailable(cause.to_string())
    }

    /// Create a `MalformedContent` with document context
    pub fn malformed<U: Into<String>, R: ToString>(uid: U, reason: R) -> Self {
        Self::MalformedContent {
            uid: uid.into(),
            reason: reason.to_string(),
        }
    }
}
