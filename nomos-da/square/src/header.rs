// crates
use serde::{Deserialize, Serialize};
// internal
use crate::merkle::{leaf, Hash, MerkleTree};
use crate::SquareError;

/// Commitment to an extended square: the roots of every row and every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAvailabilityHeader {
    #[serde(with = "nomos_utils::serde::hex_hashes")]
    row_roots: Vec<Hash>,
    #[serde(with = "nomos_utils::serde::hex_hashes")]
    column_roots: Vec<Hash>,
}

impl DataAvailabilityHeader {
    #[must_use]
    pub fn new(row_roots: Vec<Hash>, column_roots: Vec<Hash>) -> Self {
        Self {
            row_roots,
            column_roots,
        }
    }

    /// Leaves committing to the roots, row roots first.
    fn leaves(&self) -> Vec<Hash> {
        self.row_roots
            .iter()
            .chain(&self.column_roots)
            .map(|root| leaf(root))
            .collect()
    }

    /// Tree the data root is computed from, its first `square_width` leaves are the row roots.
    #[must_use]
    pub fn tree(&self) -> MerkleTree {
        MerkleTree::new(self.leaves())
    }

    /// Data root.
    #[must_use]
    pub fn hash(&self) -> Hash {
        self.tree().root()
    }

    #[must_use]
    pub fn row_roots(&self) -> &[Hash] {
        &self.row_roots
    }

    #[must_use]
    pub fn column_roots(&self) -> &[Hash] {
        &self.column_roots
    }

    #[must_use]
    pub fn row_root(&self, row: usize) -> Option<&Hash> {
        self.row_roots.get(row)
    }

    #[must_use]
    pub fn square_width(&self) -> usize {
        self.row_roots.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedHeader {
    pub height: u64,
    #[serde(with = "nomos_utils::serde::hex_array")]
    pub data_hash: Hash,
    pub dah: DataAvailabilityHeader,
}

impl ExtendedHeader {
    #[must_use]
    pub fn new(height: u64, dah: DataAvailabilityHeader) -> Self {
        Self {
            height,
            data_hash: dah.hash(),
            dah,
        }
    }

    pub fn validate(&self) -> Result<(), SquareError> {
        let rows = self.dah.row_roots.len();
        let columns = self.dah.column_roots.len();
        if rows != columns || rows == 0 || rows % 2 != 0 {
            return Err(SquareError::RootCountMismatch { rows, columns });
        }
        if self.dah.hash() != self.data_hash {
            return Err(SquareError::DataHashMismatch);
        }
        Ok(())
    }

    #[must_use]
    pub fn square_width(&self) -> usize {
        self.dah.square_width()
    }

    #[must_use]
    pub fn ods_width(&self) -> usize {
        self.square_width() / 2
    }
}
