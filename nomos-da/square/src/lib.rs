pub mod eds;
pub mod header;
pub mod merkle;
pub mod namespace;
pub mod proof;
pub mod share;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

// crates
use thiserror::Error;
// internal
pub use eds::ExtendedDataSquare;
pub use header::{DataAvailabilityHeader, ExtendedHeader};
pub use merkle::Hash;
pub use namespace::{BoundaryShare, NamespaceData, NamespaceProof, RowNamespaceData};
pub use proof::{prove_range, ProofError, RangeProof, RowProof, RowRangeProof};
pub use share::{Namespace, Share, NAMESPACE_SIZE, SHARE_SIZE};

#[derive(Debug, Error)]
pub enum SquareError {
    #[error("share must be 512 bytes, got {0}")]
    InvalidShareSize(usize),
    #[error("namespace must be 29 bytes, got {0}")]
    InvalidNamespaceSize(usize),
    #[error("payload of {0} bytes does not fit into a share")]
    PayloadTooLarge(usize),
    #[error("original square width {0} is not a power of two within the supported bounds")]
    InvalidOdsWidth(usize),
    #[error("{0} shares do not form an extended square")]
    InvalidShareCount(usize),
    #[error("namespace is interleaved with other namespaces in row {row}")]
    NamespaceNotContiguous { row: usize },
    #[error("square does not have enough shares to be repaired")]
    Unrepairable,
    #[error("header data hash does not commit to its row and column roots")]
    DataHashMismatch,
    #[error("header has {rows} row roots and {columns} column roots")]
    RootCountMismatch { rows: usize, columns: usize },
    #[error(transparent)]
    Coding(#[from] reed_solomon::Error),
}
