//! Error types for backend dispatch.

use sqlbridge_dsn::DsnError;
use thiserror::Error;

use crate::backend::Backend;

/// The opaque error type surfaced by native backend implementations.
///
/// Backend errors are passed through unmodified so callers can downcast and
/// apply backend-specific inspection.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for native backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Result type alias for dispatcher operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors produced while dispatching to a backend.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Connection-string parsing or rewriting failed.
    #[error(transparent)]
    Dsn(#[from] DsnError),

    /// Neither the selected backend nor the default backend has a registered
    /// native driver.
    #[error("no native driver registered for backend '{0}'")]
    Unregistered(Backend),

    /// Passthrough from the underlying backend, unwrapped.
    #[error("{0}")]
    Backend(BackendError),
}

impl DriverError {
    /// Wrap a native backend error for passthrough.
    pub fn backend(err: BackendError) -> Self {
        Self::Backend(err)
    }

    /// The underlying backend error, if this is a passthrough.
    pub fn as_backend(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}
