//! Core error types for Songbook
use thiserror::Error;

/// Result type alias using `SongbookError`
pub type Result<T> = std::result::Result<T, SongbookError>;

/// Core error type for Songbook
///
/// The first five variants are client-facing: their message is safe to show
/// to the caller. Everything else is a server fault.
#[derive(Error, Debug)]
pub enum SongbookError {
    /// A write that should have taken effect did not (zero rows affected, duplicate, bad reference)
    #[error("{0}")]
    Invariant(String),

    /// Resource absent
    #[error("{0}")]
    NotFound(String),

    /// Caller is known but lacks rights on the resource
    #[error("{0}")]
    Authorization(String),

    /// Caller could not be identified
    #[error("{0}")]
    Authentication(String),

    /// Request payload failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Cache backend errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SongbookError {
    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an authorization error
    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a cache error
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Whether the failure was caused by the caller and may be reported verbatim
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Invariant(_)
                | Self::NotFound(_)
                | Self::Authorization(_)
                | Self::Authentication(_)
                | Self::InvalidInput(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for SongbookError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
