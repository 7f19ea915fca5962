// std
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
// crates
use nomos_da_share::availability::Availability;
use nomos_da_share::error::{DynError, ShareError};
use nomos_da_share::getter::Getter;
use nomos_da_share::header::HeaderResolver;
use nomos_da_share::network::{NetworkAdapter, Sample};
use nomos_da_square::{
    ExtendedDataSquare, ExtendedHeader, Hash, Namespace, NamespaceData, Share,
};
// internal

#[derive(Default)]
pub struct Counter(AtomicUsize);

impl Counter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct MockHeaders {
    headers: HashMap<u64, ExtendedHeader>,
    pub calls: Counter,
}

impl MockHeaders {
    pub fn with(headers: impl IntoIterator<Item = ExtendedHeader>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| (h.height, h)).collect(),
            calls: Counter::default(),
        }
    }
}

#[async_trait::async_trait]
impl HeaderResolver for MockHeaders {
    async fn get_by_height(&self, height: u64) -> Result<ExtendedHeader, ShareError> {
        self.calls.hit();
        self.headers
            .get(&height)
            .cloned()
            .ok_or(ShareError::HeaderNotFound(height))
    }
}

/// Getter answering from in memory squares, optionally never answering at all.
#[derive(Default)]
pub struct MockGetter {
    squares: HashMap<Hash, Arc<ExtendedDataSquare>>,
    stall: bool,
    pub share_calls: Counter,
    pub eds_calls: Counter,
    pub namespace_calls: Counter,
}

impl MockGetter {
    pub fn with(squares: impl IntoIterator<Item = (Hash, ExtendedDataSquare)>) -> Self {
        Self {
            squares: squares
                .into_iter()
                .map(|(hash, square)| (hash, Arc::new(square)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::default()
        }
    }

    async fn square(&self, header: &ExtendedHeader) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        if self.stall {
            std::future::pending::<()>().await;
        }
        self.squares
            .get(&header.data_hash)
            .cloned()
            .ok_or(ShareError::NotFound)
    }
}

#[async_trait::async_trait]
impl Getter for MockGetter {
    async fn get_share(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError> {
        self.share_calls.hit();
        self.square(header)
            .await?
            .share(row, col)
            .cloned()
            .ok_or(ShareError::NotFound)
    }

    async fn get_eds(
        &self,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        self.eds_calls.hit();
        self.square(header).await
    }

    async fn get_shares_by_namespace(
        &self,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespaceData, ShareError> {
        self.namespace_calls.hit();
        Ok(self.square(header).await?.namespace_data(namespace)?)
    }
}

#[derive(Default)]
pub struct MockAvailability {
    pub calls: Counter,
}

#[async_trait::async_trait]
impl Availability for MockAvailability {
    async fn shares_available(&self, _header: &ExtendedHeader) -> Result<(), ShareError> {
        self.calls.hit();
        Ok(())
    }
}

/// Peers holding a set of squares.
#[derive(Default)]
pub struct MockNetwork {
    squares: HashMap<Hash, ExtendedDataSquare>,
    /// Shares at these flattened indexes are never served.
    withheld: Vec<usize>,
    corrupt: bool,
    delay: Option<Duration>,
    pub shares_calls: Counter,
    pub sample_calls: Counter,
}

impl MockNetwork {
    pub fn with(squares: impl IntoIterator<Item = ExtendedDataSquare>) -> Self {
        Self {
            squares: squares
                .into_iter()
                .map(|square| (square.data_availability_header().hash(), square))
                .collect(),
            ..Self::default()
        }
    }

    pub fn withholding(mut self, withheld: impl IntoIterator<Item = usize>) -> Self {
        self.withheld = withheld.into_iter().collect();
        self
    }

    /// Serve shares of a different square than the one requested.
    pub fn corrupted(mut self) -> Self {
        self.corrupt = true;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn square(&self, header: &ExtendedHeader) -> Result<&ExtendedDataSquare, DynError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.squares
            .get(&header.data_hash)
            .ok_or_else(|| "no peer holds the square".into())
    }
}

#[async_trait::async_trait]
impl NetworkAdapter for MockNetwork {
    async fn get_sample(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Sample, DynError> {
        self.sample_calls.hit();
        let square = self.square(header).await?;
        let served_col = if self.corrupt { (col + 1) % square.width() } else { col };
        let share = square
            .share(row, served_col)
            .cloned()
            .ok_or("coordinates out of the square")?;
        Ok(Sample {
            row,
            col,
            share,
            proof: square.row_tree(row).path(col),
        })
    }

    async fn get_shares(&self, header: &ExtendedHeader) -> Result<Vec<Option<Share>>, DynError> {
        self.shares_calls.hit();
        let square = self.square(header).await?;
        let mut shares: Vec<Option<Share>> = square.shares().iter().cloned().map(Some).collect();
        for &idx in &self.withheld {
            shares[idx] = None;
        }
        if self.corrupt {
            shares.rotate_left(1);
        }
        Ok(shares)
    }
}

/// Forwards to a shared network so tests can keep counting after handing it over.
pub struct SharedNetwork(pub Arc<MockNetwork>);

#[async_trait::async_trait]
impl NetworkAdapter for SharedNetwork {
    async fn get_sample(
        &self,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Sample, DynError> {
        self.0.get_sample(header, row, col).await
    }

    async fn get_shares(&self, header: &ExtendedHeader) -> Result<Vec<Option<Share>>, DynError> {
        self.0.get_shares(header).await
    }
}
