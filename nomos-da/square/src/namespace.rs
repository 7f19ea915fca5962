// crates
use serde::{Deserialize, Serialize};
// internal
use crate::eds::ExtendedDataSquare;
use crate::header::DataAvailabilityHeader;
use crate::merkle::{leaf, path_index, path_root, Hash, MerkleTree, PathNode};
use crate::proof::{ProofError, RowRangeProof};
use crate::share::{Namespace, Share};
use crate::SquareError;

/// Share right outside a namespace run, with its path to the row root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryShare {
    pub share: Share,
    pub path: Vec<PathNode>,
}

impl BoundaryShare {
    fn new(tree: &MerkleTree, shares: &[Share], col: usize) -> Self {
        Self {
            share: shares[col].clone(),
            path: tree.path(col),
        }
    }
}

/// Inclusion of a namespace run into its row root. The neighbours of the run within the
/// original square are proven too, so a run missing its first or last shares is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceProof {
    pub range: RowRangeProof,
    pub before: Option<BoundaryShare>,
    pub after: Option<BoundaryShare>,
}

impl NamespaceProof {
    #[must_use]
    pub fn row(&self) -> usize {
        self.range.row
    }

    pub fn verify(
        &self,
        namespace: Namespace,
        shares: &[Share],
        row_root: &Hash,
    ) -> Result<(), ProofError> {
        if self.range.is_empty() {
            return Err(ProofError::Malformed("empty namespace run"));
        }
        self.range.verify(shares, row_root)?;

        // row trees hold exactly 2k leaves
        let depth = self.range.paths.first().map_or(0, Vec::len);
        let ods_width = 1usize
            .checked_shl(depth as u32)
            .map(|leaves| leaves / 2)
            .filter(|&k| k > 0)
            .ok_or(ProofError::Malformed("inconsistent row proof depth"))?;
        if self.range.end > ods_width {
            return Err(ProofError::Malformed("namespace run leaves the original square"));
        }

        let before = self.range.start.checked_sub(1);
        let after = (self.range.end < ods_width).then_some(self.range.end);
        self.verify_boundary(self.before.as_ref(), before, depth, namespace, row_root)?;
        self.verify_boundary(self.after.as_ref(), after, depth, namespace, row_root)
    }

    fn verify_boundary(
        &self,
        boundary: Option<&BoundaryShare>,
        expected_col: Option<usize>,
        depth: usize,
        namespace: Namespace,
        row_root: &Hash,
    ) -> Result<(), ProofError> {
        let bounded = match (boundary, expected_col) {
            (None, None) => true,
            (Some(boundary), Some(col)) => {
                boundary.path.len() == depth
                    && path_index(&boundary.path) == col
                    && boundary.share.namespace() != namespace
                    && path_root(leaf(boundary.share.as_bytes()), &boundary.path) == *row_root
            }
            _ => false,
        };
        if bounded {
            Ok(())
        } else {
            Err(ProofError::IncompleteNamespace { row: self.row() })
        }
    }
}

/// Shares of a namespace within a single row, with the proof they are all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowNamespaceData {
    pub shares: Vec<Share>,
    pub proof: NamespaceProof,
}

impl RowNamespaceData {
    #[must_use]
    pub fn row(&self) -> usize {
        self.proof.row()
    }

    pub fn verify(
        &self,
        namespace: Namespace,
        dah: &DataAvailabilityHeader,
    ) -> Result<(), ProofError> {
        if self.shares.iter().any(|share| share.namespace() != namespace) {
            return Err(ProofError::Malformed("share outside of the namespace"));
        }
        let root = dah
            .row_root(self.row())
            .ok_or(ProofError::Malformed("row is not part of the square"))?;
        self.proof.verify(namespace, &self.shares, root)
    }
}

/// Rows of the original square holding a namespace, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceData {
    pub rows: Vec<RowNamespaceData>,
}

impl NamespaceData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn verify(
        &self,
        namespace: Namespace,
        dah: &DataAvailabilityHeader,
    ) -> Result<(), ProofError> {
        self.rows
            .iter()
            .try_for_each(|row| row.verify(namespace, dah))
    }
}

impl ExtendedDataSquare {
    /// Collect the shares of `namespace` from every row of the original square.
    /// Within a row the namespace must form a single run, rows interleaving it with
    /// other namespaces are rejected.
    pub fn namespace_data(&self, namespace: Namespace) -> Result<NamespaceData, SquareError> {
        let k = self.ods_width();
        let mut rows = Vec::new();
        for row in 0..k {
            let shares = &self.row(row)[..k];
            let Some(first) = shares.iter().position(|s| s.namespace() == namespace) else {
                continue;
            };
            let last = shares
                .iter()
                .rposition(|s| s.namespace() == namespace)
                .unwrap_or(first);
            let run = &shares[first..=last];
            if run.iter().any(|s| s.namespace() != namespace) {
                return Err(SquareError::NamespaceNotContiguous { row });
            }

            let tree = self.row_tree(row);
            let boundary = |col: usize| BoundaryShare::new(&tree, shares, col);
            rows.push(RowNamespaceData {
                shares: run.to_vec(),
                proof: NamespaceProof {
                    range: RowRangeProof::new(&tree, row, first..last + 1),
                    before: first.checked_sub(1).map(&boundary),
                    after: (last + 1 < k).then(|| boundary(last + 1)),
                },
            });
        }
        Ok(NamespaceData { rows })
    }
}
