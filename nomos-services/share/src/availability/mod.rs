pub mod sampler;

// crates
use nomos_da_square::ExtendedHeader;
// internal
use crate::error::ShareError;

/// Subjective check that the data committed to by a header can be retrieved.
#[async_trait::async_trait]
pub trait Availability: Send + Sync {
    async fn shares_available(&self, header: &ExtendedHeader) -> Result<(), ShareError>;
}
