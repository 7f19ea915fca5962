// std
use std::ops::Range;
// crates
use serde::{Deserialize, Serialize};
use thiserror::Error;
// internal
use crate::eds::ExtendedDataSquare;
use crate::merkle::{leaf, path_index, path_root, Hash, MerkleTree, PathNode};
use crate::share::Share;

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("invalid range [{start}, {end}) over {len} shares")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("expected {expected} shares, got {got}")]
    ShareCountMismatch { expected: usize, got: usize },
    #[error("share {index} of row {row} is not included in the row root")]
    InvalidShareProof { row: usize, index: usize },
    #[error("row root {0} is not included in the data root")]
    InvalidRowProof(usize),
    #[error("namespace run in row {row} is not proven complete")]
    IncompleteNamespace { row: usize },
    #[error("proof is malformed: {0}")]
    Malformed(&'static str),
}

/// Inclusion of the shares `[start, end)` of a single row into that row's root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRangeProof {
    pub row: usize,
    pub start: usize,
    pub end: usize,
    pub paths: Vec<Vec<PathNode>>,
}

impl RowRangeProof {
    #[must_use]
    pub fn new(tree: &MerkleTree, row: usize, columns: Range<usize>) -> Self {
        Self {
            row,
            start: columns.start,
            end: columns.end,
            paths: columns.map(|col| tree.path(col)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn verify(&self, shares: &[Share], row_root: &Hash) -> Result<(), ProofError> {
        if shares.len() != self.len() || self.paths.len() != self.len() {
            return Err(ProofError::ShareCountMismatch {
                expected: self.len(),
                got: shares.len(),
            });
        }
        for (index, (share, path)) in (self.start..self.end).zip(shares.iter().zip(&self.paths)) {
            if path_index(path) != index || path_root(leaf(share.as_bytes()), path) != *row_root {
                return Err(ProofError::InvalidShareProof {
                    row: self.row,
                    index,
                });
            }
        }
        Ok(())
    }
}

/// Inclusion of the row roots `[start_row, end_row)` into the data root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowProof {
    pub start_row: usize,
    pub end_row: usize,
    #[serde(with = "nomos_utils::serde::hex_hashes")]
    pub row_roots: Vec<Hash>,
    pub proofs: Vec<Vec<PathNode>>,
}

impl RowProof {
    pub fn verify(&self, data_root: &Hash) -> Result<(), ProofError> {
        let rows = self.end_row.saturating_sub(self.start_row);
        if self.row_roots.len() != rows || self.proofs.len() != rows {
            return Err(ProofError::Malformed("row roots do not match the proven rows"));
        }
        let rows = self.start_row..self.end_row;
        for (row, (root, path)) in rows.zip(self.row_roots.iter().zip(&self.proofs)) {
            if path_index(path) != row || path_root(leaf(root), path) != *data_root {
                return Err(ProofError::InvalidRowProof(row));
            }
        }
        Ok(())
    }

    /// Original square width implied by the depth of the data root tree, which holds
    /// `2k` row roots followed by `2k` column roots.
    fn ods_width(&self) -> Option<usize> {
        let depth = self.proofs.first()?.len();
        if depth < 2 || self.proofs.iter().any(|path| path.len() != depth) {
            return None;
        }
        1usize.checked_shl(depth as u32).map(|leaves| leaves / 4)
    }
}

/// Proof that a contiguous slice of the flattened original square belongs to a data root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    pub start: usize,
    pub end: usize,
    pub share_proofs: Vec<RowRangeProof>,
    pub row_proof: RowProof,
}

impl RangeProof {
    pub fn verify(&self, shares: &[Share], data_root: &Hash) -> Result<(), ProofError> {
        if shares.len() != self.end.saturating_sub(self.start) {
            return Err(ProofError::ShareCountMismatch {
                expected: self.end.saturating_sub(self.start),
                got: shares.len(),
            });
        }
        self.row_proof.verify(data_root)?;

        let k = self
            .row_proof
            .ods_width()
            .ok_or(ProofError::Malformed("inconsistent row proof depth"))?;
        if self.start >= self.end || self.end > k * k {
            return Err(ProofError::InvalidRange {
                start: self.start,
                end: self.end,
                len: k * k,
            });
        }
        let rows = spanned_rows(k, self.start, self.end);
        if self.row_proof.start_row != rows.start
            || self.row_proof.end_row != rows.end
            || self.share_proofs.len() != rows.len()
        {
            return Err(ProofError::Malformed("proven rows do not span the range"));
        }

        let mut remaining = shares;
        for ((row, share_proof), row_root) in rows
            .zip(&self.share_proofs)
            .zip(&self.row_proof.row_roots)
        {
            let columns = row_columns(k, row, self.start, self.end);
            if share_proof.row != row
                || share_proof.start != columns.start
                || share_proof.end != columns.end
            {
                return Err(ProofError::Malformed("share proof does not cover its row slice"));
            }
            let (row_shares, rest) = remaining.split_at(columns.len());
            share_proof.verify(row_shares, row_root)?;
            remaining = rest;
        }
        Ok(())
    }
}

fn spanned_rows(k: usize, start: usize, end: usize) -> Range<usize> {
    start / k..(end - 1) / k + 1
}

/// Columns of `row` covered by the flattened range `[start, end)`.
fn row_columns(k: usize, row: usize, start: usize, end: usize) -> Range<usize> {
    let first = if row == start / k { start % k } else { 0 };
    let last = if row == (end - 1) / k { (end - 1) % k + 1 } else { k };
    first..last
}

/// Prove the shares `[start, end)` of the flattened original square of `square`.
pub fn prove_range(
    square: &ExtendedDataSquare,
    start: usize,
    end: usize,
) -> Result<RangeProof, ProofError> {
    let k = square.ods_width();
    if start >= end || end > k * k {
        return Err(ProofError::InvalidRange {
            start,
            end,
            len: k * k,
        });
    }

    let rows = spanned_rows(k, start, end);
    let share_proofs = rows
        .clone()
        .map(|row| {
            RowRangeProof::new(&square.row_tree(row), row, row_columns(k, row, start, end))
        })
        .collect();

    let dah = square.data_availability_header();
    let tree = dah.tree();
    let row_proof = RowProof {
        start_row: rows.start,
        end_row: rows.end,
        row_roots: dah.row_roots()[rows.clone()].to_vec(),
        proofs: rows.map(|row| tree.path(row)).collect(),
    };

    Ok(RangeProof {
        start,
        end,
        share_proofs,
        row_proof,
    })
}
