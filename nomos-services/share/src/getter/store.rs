// std
use std::sync::Arc;
use std::time::Duration;
// crates
use moka::future::{Cache, CacheBuilder};
use nomos_da_square::{
    ExtendedDataSquare, ExtendedHeader, Hash, Namespace, NamespaceData, Share, SquareError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
// internal
use crate::error::ShareError;
use crate::getter::Getter;
use crate::network::NetworkAdapter;
use crate::storage::SquareStore;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheSettings {
    pub max_squares: u64,
    pub max_shares: u64,
    #[serde(with = "humantime_serde")]
    pub time_to_live: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_squares: 16,
            max_shares: 4096,
            time_to_live: Duration::from_secs(60),
        }
    }
}

type ShareKey = (Hash, usize, usize);

/// Serves requests from the local store, falling back to the network and persisting
/// whatever it had to fetch. Concurrent requests for the same square or share share
/// a single retrieval.
pub struct StoreGetter<S, N> {
    store: S,
    network: N,
    squares: Cache<Hash, Arc<ExtendedDataSquare>>,
    shares: Cache<ShareKey, Share>,
}

impl<S, N> StoreGetter<S, N>
where
    S: SquareStore,
    N: NetworkAdapter,
{
    pub fn new(store: S, network: N, settings: &CacheSettings) -> Self {
        let squares = CacheBuilder::new(settings.max_squares)
            .time_to_live(settings.time_to_live)
            .build();
        let shares = CacheBuilder::new(settings.max_shares)
            .time_to_live(settings.time_to_live)
            .build();
        Self {
            store,
            network,
            squares,
            shares,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn retrieve_square(
        &self,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        let stored = self
            .store
            .get_square(&header.data_hash)
            .await
            .map_err(ShareError::storage)?;
        if let Some(square) = stored {
            debug!(height = header.height, "square served from local store");
            return Ok(Arc::new(square));
        }

        debug!(height = header.height, "fetching square from the network");
        let shares = self
            .network
            .get_shares(header)
            .await
            .map_err(ShareError::network)?;
        let square =
            ExtendedDataSquare::repair(header.square_width(), shares).map_err(|e| match e {
                SquareError::Unrepairable | SquareError::InvalidShareCount(_) => {
                    ShareError::Unavailable {
                        height: header.height,
                        reason: e.to_string(),
                    }
                }
                e => e.into(),
            })?;
        if square.data_availability_header() != header.dah {
            warn!(height = header.height, "network square does not match header");
            return Err(ShareError::CommitmentMismatch);
        }

        self.store
            .put_square(&header.data_hash, &square)
            .await
            .map_err(ShareError::storage)?;
        Ok(Arc::new(square))
    }

    async fn retrieve_share(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError> {
        let data_hash = &header.data_hash;
        if let Some(share) = self
            .store
            .get_share(data_hash, row, col)
            .await
            .map_err(ShareError::storage)?
        {
            return Ok(share);
        }
        if let Some(share) = self
            .store
            .get_square(data_hash)
            .await
            .map_err(ShareError::storage)?
            .and_then(|square| square.share(row, col).cloned())
        {
            return Ok(share);
        }

        let sample = self
            .network
            .get_sample(header, row, col)
            .await
            .map_err(ShareError::network)?;
        if sample.row != row || sample.col != col || !sample.verify(header) {
            warn!(height = header.height, row, col, "sample does not match header");
            return Err(ShareError::CommitmentMismatch);
        }
        self.store
            .put_share(data_hash, row, col, &sample.share)
            .await
            .map_err(ShareError::storage)?;
        Ok(sample.share)
    }
}

#[async_trait::async_trait]
impl<S, N> Getter for StoreGetter<S, N>
where
    S: SquareStore,
    N: NetworkAdapter,
{
    #[instrument(skip_all, fields(height = header.height, row = row, col = col))]
    async fn get_share(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError> {
        header.validate().map_err(ShareError::header)?;
        let width = header.square_width();
        if row >= width || col >= width {
            return Err(ShareError::ShareOutOfRange { row, col, width });
        }
        if let Some(share) = self
            .squares
            .get(&header.data_hash)
            .and_then(|square| square.share(row, col).cloned())
        {
            return Ok(share);
        }
        self.shares
            .try_get_with(
                (header.data_hash, row, col),
                self.retrieve_share(header, row, col),
            )
            .await
            .map_err(ShareError::from)
    }

    #[instrument(skip_all, fields(height = header.height))]
    async fn get_eds(
        &self,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        header.validate().map_err(ShareError::header)?;
        self.squares
            .try_get_with(header.data_hash, self.retrieve_square(header))
            .await
            .map_err(ShareError::from)
    }

    #[instrument(skip_all, fields(height = header.height, namespace = %namespace))]
    async fn get_shares_by_namespace(
        &self,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespaceData, ShareError> {
        let square = self.get_eds(header).await?;
        Ok(square.namespace_data(namespace)?)
    }
}
