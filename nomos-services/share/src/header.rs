// crates
use nomos_da_square::ExtendedHeader;
// internal
use crate::error::ShareError;

/// Source of canonical headers by block height.
#[async_trait::async_trait]
pub trait HeaderResolver: Send + Sync {
    async fn get_by_height(&self, height: u64) -> Result<ExtendedHeader, ShareError>;
}
