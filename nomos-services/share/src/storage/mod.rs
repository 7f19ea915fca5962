pub mod adapters;

// crates
use nomos_da_square::{ExtendedDataSquare, Hash, Share};
// internal
use crate::error::DynError;

/// Local persistence of squares and individual shares, keyed by data root.
#[async_trait::async_trait]
pub trait SquareStore: Send + Sync {
    type Settings: Clone + Send + Sync + 'static;

    fn new(settings: Self::Settings) -> Self;

    async fn get_square(&self, data_hash: &Hash) -> Result<Option<ExtendedDataSquare>, DynError>;

    async fn put_square(&self, data_hash: &Hash, square: &ExtendedDataSquare)
        -> Result<(), DynError>;

    async fn get_share(
        &self,
        data_hash: &Hash,
        row: usize,
        col: usize,
    ) -> Result<Option<Share>, DynError>;

    async fn put_share(
        &self,
        data_hash: &Hash,
        row: usize,
        col: usize,
        share: &Share,
    ) -> Result<(), DynError>;
}
