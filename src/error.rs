//! The errors a table source can return

use thiserror::Error;

/// What went wrong during a [`TableSource`](crate::traits::TableSource) operation.
///
/// Every variant is recoverable: callers keep their last known good state, tell the
/// user, and may simply retry the operation later.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never completed (DNS failure, connection refused, dropped socket...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The store answered with an error status
    #[error("The store rejected the request (status {status}): {message}")]
    Rejected {
        status: u16,
        message: String,
    },

    /// The targeted row does not exist in the store (anymore)
    #[error("No matching row in the store")]
    NotFound,

    /// The store answered something this crate could not make sense of
    #[error("Unexpected answer from the store: {0}")]
    BadResponse(String),

    /// The source cannot serve requests right now
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// See [`StoreError`]
pub type StoreResult<T> = Result<T, StoreError>;
