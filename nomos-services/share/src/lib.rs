pub mod api;
pub mod availability;
pub mod context;
pub mod error;
pub mod getter;
pub mod header;
pub mod namespaced;
pub mod network;
pub mod settings;
pub mod storage;

// std
use std::sync::Arc;
use std::time::Duration;
// crates
use nomos_da_square::{prove_range, ExtendedDataSquare, ExtendedHeader, Namespace, Share};
use tracing::{debug, instrument};
// internal
use crate::availability::{sampler::ShareSampler, Availability};
use crate::context::RequestContext;
use crate::error::ShareError;
use crate::getter::{store::StoreGetter, Getter};
use crate::header::HeaderResolver;
use crate::namespaced::{GetRangeResult, NamespacedShares};
use crate::network::NetworkAdapter;
use crate::settings::ShareServiceSettings;
use crate::storage::{adapters::fs::FsStore, SquareStore};

/// Share retrieval surface: every request resolves data committed to by a header,
/// together with the proofs binding it to that header.
#[async_trait::async_trait]
pub trait Module: Send + Sync {
    /// Subjectively validates that the square committed to by `header` is retrievable.
    async fn shares_available(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
    ) -> Result<(), ShareError>;

    /// Share at `(row, col)` of the extended square.
    async fn get_share(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError>;

    /// Whole extended square, reconstructing it if needed.
    async fn get_eds(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError>;

    /// Every share of `namespace`, grouped by row. No match yields an empty result.
    async fn get_shares_by_namespace(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespacedShares, ShareError>;

    /// Shares `[start, end)` of the flattened original square of the block at `height`.
    async fn get_range(
        &self,
        ctx: &RequestContext,
        height: u64,
        start: usize,
        end: usize,
    ) -> Result<GetRangeResult, ShareError>;
}

pub struct ShareService<G, A, H> {
    getter: G,
    availability: A,
    headers: H,
    request_timeout: Option<Duration>,
}

pub type DefaultGetter<N> = Arc<StoreGetter<FsStore, N>>;
pub type DefaultShareService<N, H> =
    ShareService<DefaultGetter<N>, ShareSampler<DefaultGetter<N>>, H>;

impl<G, A, H> ShareService<G, A, H>
where
    G: Getter,
    A: Availability,
    H: HeaderResolver,
{
    pub fn new(getter: G, availability: A, headers: H) -> Self {
        Self {
            getter,
            availability,
            headers,
            request_timeout: None,
        }
    }

    /// Bound every request by `timeout`, on top of the caller's own deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn scope(&self, ctx: &RequestContext) -> RequestContext {
        ctx.child(self.request_timeout)
    }
}

impl<N, H> DefaultShareService<N, H>
where
    N: NetworkAdapter,
    H: HeaderResolver,
{
    /// Store backed service sampling through the same getter it serves requests with.
    pub fn from_settings(settings: &ShareServiceSettings, network: N, headers: H) -> Self {
        let store = FsStore::new(settings.store.clone());
        let getter = Arc::new(StoreGetter::new(store, network, &settings.cache));
        let sampler = ShareSampler::new(Arc::clone(&getter), &settings.sampling);
        Self::new(getter, sampler, headers).with_request_timeout(settings.request_timeout)
    }
}

#[async_trait::async_trait]
impl<G, A, H> Module for ShareService<G, A, H>
where
    G: Getter,
    A: Availability,
    H: HeaderResolver,
{
    #[instrument(skip_all, fields(height = header.height))]
    async fn shares_available(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
    ) -> Result<(), ShareError> {
        self.scope(ctx)
            .run(self.availability.shares_available(header))
            .await
    }

    #[instrument(skip_all, fields(height = header.height, row = row, col = col))]
    async fn get_share(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
        row: usize,
        col: usize,
    ) -> Result<Share, ShareError> {
        header.validate().map_err(ShareError::header)?;
        let width = header.square_width();
        if row >= width || col >= width {
            return Err(ShareError::ShareOutOfRange { row, col, width });
        }
        self.scope(ctx)
            .run(self.getter.get_share(header, row, col))
            .await
    }

    #[instrument(skip_all, fields(height = header.height))]
    async fn get_eds(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
    ) -> Result<Arc<ExtendedDataSquare>, ShareError> {
        self.scope(ctx).run(self.getter.get_eds(header)).await
    }

    #[instrument(skip_all, fields(height = header.height, namespace = %namespace))]
    async fn get_shares_by_namespace(
        &self,
        ctx: &RequestContext,
        header: &ExtendedHeader,
        namespace: Namespace,
    ) -> Result<NamespacedShares, ShareError> {
        let data = self
            .scope(ctx)
            .run(self.getter.get_shares_by_namespace(header, namespace))
            .await?;
        Ok(NamespacedShares::from(data))
    }

    #[instrument(skip_all, fields(height = height, start = start, end = end))]
    async fn get_range(
        &self,
        ctx: &RequestContext,
        height: u64,
        start: usize,
        end: usize,
    ) -> Result<GetRangeResult, ShareError> {
        let ctx = self.scope(ctx);
        let header = ctx.run(self.headers.get_by_height(height)).await?;

        let ods_width = header.ods_width();
        let len = ods_width * ods_width;
        if start >= end || end > len {
            return Err(ShareError::OutOfRange { start, end, len });
        }

        let square = ctx.run(self.getter.get_eds(&header)).await?;
        if square.width() != header.square_width() {
            return Err(ShareError::SquareSizeMismatch {
                expected: header.square_width(),
                got: square.width(),
            });
        }
        let proof = prove_range(&square, start, end)?;
        let shares = (start..end)
            .filter_map(|idx| square.share(idx / ods_width, idx % ods_width).cloned())
            .collect();
        debug!("range proven");
        Ok(GetRangeResult { shares, proof })
    }
}
