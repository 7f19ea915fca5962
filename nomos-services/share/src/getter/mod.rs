pub mod store;

// std
use std::sync::Arc;
// crates
use nomos_da_square::{ExtendedDataSquare, ExtendedHeader, Namespace, NamespaceData, Share};
// internal
use crate::error::ShareError;

/// Retrieval of square data committed to by a header.
#[async_trait::async_trait]
pub trait Getter: Send + Sync {
    async fn get_share(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError>;

    async fn get_eds(&self, header: &ExtendedHeader)
        -> Result<Arc<ExtendedDataSquare>, ShareError>;

    async fn get_shares_by_namespace(
        &self,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespaceData, ShareError>;
}

#[async_trait::async_trait]
impl<G: Getter + ?Sized> Getter for Arc<G> {
    async fn get_share(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError> {
        (**self).get_share(header, row, col).await
    }

    async fn get_eds(
        &self,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        (**self).get_eds(header).await
    }

    async fn get_shares_by_namespace(
        &self,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespaceData, ShareError> {
        (**self).get_shares_by_namespace(header, namespace).await
    }
}
