// crates
use nomos_da_square::merkle::{leaf, path_index, path_root, PathNode};
use nomos_da_square::{ExtendedHeader, Share};
use serde::{Deserialize, Serialize};
// internal
use crate::error::DynError;

/// Share served by a peer together with its inclusion path to the row root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub row: usize,
    pub col: usize,
    pub share: Share,
    pub proof: Vec<PathNode>,
}

impl Sample {
    /// Whether the sample sits at its claimed coordinates under the header's row root.
    #[must_use]
    pub fn verify(&self, header: &ExtendedHeader) -> bool {
        header.dah.row_root(self.row).is_some_and(|root| {
            path_index(&self.proof) == self.col
                && path_root(leaf(self.share.as_bytes()), &self.proof) == *root
        })
    }
}

/// Peer facing retrieval. Transport and peer selection are up to the implementor.
#[async_trait::async_trait]
pub trait NetworkAdapter: Send + Sync {
    async fn get_sample(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Sample, DynError>;

    /// Every share peers could provide for the square, row-major, `None` where missing.
    async fn get_shares(&self, header: &ExtendedHeader) -> Result<Vec<Option<Share>>, DynError>;
}
