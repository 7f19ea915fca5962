// std
use std::error::Error;
use std::sync::Arc;
// crates
use nomos_da_square::{ProofError, SquareError};
use thiserror::Error;
// internal

pub type DynError = Box<dyn Error + Send + Sync + 'static>;

/// Failure of a share request.
///
/// Cloneable so a single failed fetch can be reported to every request waiting on it.
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("share not found")]
    NotFound,
    #[error("data at height {height} is not available: {reason}")]
    Unavailable { height: u64, reason: String },
    #[error("range [{start}, {end}) is out of bounds for {len} original shares")]
    OutOfRange { start: usize, end: usize, len: usize },
    #[error("coordinates ({row}, {col}) are out of bounds for a square of width {width}")]
    ShareOutOfRange { row: usize, col: usize, width: usize },
    #[error("no header at height {0}")]
    HeaderNotFound(u64),
    #[error("invalid header: {0}")]
    Header(#[source] Arc<SquareError>),
    #[error("square of width {got} does not match header width {expected}")]
    SquareSizeMismatch { expected: usize, got: usize },
    #[error("retrieved data does not match the header commitment")]
    CommitmentMismatch,
    #[error(transparent)]
    Proof(Arc<ProofError>),
    #[error(transparent)]
    Square(Arc<SquareError>),
    #[error("storage failure: {0}")]
    Storage(#[source] Arc<dyn Error + Send + Sync>),
    #[error("network failure: {0}")]
    Network(#[source] Arc<dyn Error + Send + Sync>),
    #[error("request cancelled")]
    Cancelled,
    #[error("request deadline exceeded")]
    DeadlineExceeded,
    #[error("permission `{0}` is required")]
    PermissionDenied(&'static str),
}

impl ShareError {
    pub fn storage(error: impl Into<DynError>) -> Self {
        Self::Storage(Arc::from(error.into()))
    }

    pub fn network(error: impl Into<DynError>) -> Self {
        Self::Network(Arc::from(error.into()))
    }

    pub fn header(error: SquareError) -> Self {
        Self::Header(Arc::new(error))
    }

    /// Cancellation and deadline failures are caused by the caller, not by the data.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::HeaderNotFound(_))
    }

    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::ShareOutOfRange { .. })
    }
}

impl From<SquareError> for ShareError {
    fn from(error: SquareError) -> Self {
        Self::Square(Arc::new(error))
    }
}

impl From<ProofError> for ShareError {
    fn from(error: ProofError) -> Self {
        Self::Proof(Arc::new(error))
    }
}

impl From<Arc<ShareError>> for ShareError {
    fn from(error: Arc<ShareError>) -> Self {
        Arc::unwrap_or_clone(error)
    }
}
