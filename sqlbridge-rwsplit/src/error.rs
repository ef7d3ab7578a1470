//! Error types for the split connection manager.

use sqlbridge_dsn::DsnError;
use thiserror::Error;

/// Result type alias for split-manager operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors produced while building or using a split connection set.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Invalid connection-set configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Canonical connection-string validation failed.
    #[error(transparent)]
    Dsn(#[from] DsnError),

    /// Passthrough from the underlying pool, unwrapped.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SplitError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
