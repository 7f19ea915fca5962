// crates
use nomos_da_square::{NamespaceData, NamespaceProof, RangeProof, Share};
use serde::{Deserialize, Serialize};
// internal

/// Shares of a namespace found in one row, with the proof that they are included in the
/// row root and that the row holds no other share of the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacedRow {
    pub shares: Vec<Share>,
    pub proof: NamespaceProof,
}

/// Rows holding a namespace, in ascending row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespacedShares(pub Vec<NamespacedRow>);

impl NamespacedShares {
    /// Every share of every row, rows kept in order.
    #[must_use]
    pub fn flatten(&self) -> Vec<Share> {
        self.0
            .iter()
            .flat_map(|row| row.shares.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespacedRow> {
        self.0.iter()
    }
}

impl From<NamespaceData> for NamespacedShares {
    fn from(data: NamespaceData) -> Self {
        Self(
            data.rows
                .into_iter()
                .map(|row| NamespacedRow {
                    shares: row.shares,
                    proof: row.proof,
                })
                .collect(),
        )
    }
}

impl IntoIterator for NamespacedShares {
    type Item = NamespacedRow;
    type IntoIter = std::vec::IntoIter<NamespacedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Slice of the original square together with the proof of its inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRangeResult {
    pub shares: Vec<Share>,
    pub proof: RangeProof,
}
