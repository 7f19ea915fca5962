// std
use std::time::Duration;
// crates
use futures::future::try_join_all;
use moka::future::{Cache, CacheBuilder};
use nomos_da_square::{ExtendedHeader, Hash};
use nomos_utils::fisheryates::FisherYatesShuffle;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
// internal
use crate::availability::Availability;
use crate::error::ShareError;
use crate::getter::Getter;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SamplingSettings {
    /// Number of distinct coordinates retrieved per header.
    pub samples: usize,
    /// Number of data roots remembered as available.
    pub validated_capacity: u64,
    #[serde(with = "humantime_serde")]
    pub validated_ttl: Duration,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            samples: 16,
            validated_capacity: 1024,
            validated_ttl: Duration::from_secs(3600),
        }
    }
}

/// Samples random coordinates of the extended square through a [`Getter`].
pub struct ShareSampler<G> {
    getter: G,
    samples: usize,
    validated: Cache<Hash, ()>,
}

impl<G: Getter> ShareSampler<G> {
    pub fn new(getter: G, settings: &SamplingSettings) -> Self {
        let validated = CacheBuilder::new(settings.validated_capacity)
            .time_to_live(settings.validated_ttl)
            .build();
        Self {
            getter,
            samples: settings.samples,
            validated,
        }
    }

    fn coordinates(&self, width: usize) -> Vec<(usize, usize)> {
        let mut entropy = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut entropy);
        FisherYatesShuffle::new(entropy)
            .sample(width * width, self.samples)
            .into_iter()
            .map(|idx| (idx / width, idx % width))
            .collect()
    }
}

#[async_trait::async_trait]
impl<G: Getter> Availability for ShareSampler<G> {
    #[instrument(skip_all, fields(height = header.height))]
    async fn shares_available(&self, header: &ExtendedHeader) -> Result<(), ShareError> {
        header.validate().map_err(ShareError::header)?;
        if self.validated.contains_key(&header.data_hash) {
            return Ok(());
        }

        let coordinates = self.coordinates(header.square_width());
        debug!(samples = coordinates.len(), "sampling square");
        try_join_all(
            coordinates
                .iter()
                .map(|&(row, col)| self.getter.get_share(header, row, col)),
        )
        .await
        .map_err(|e| {
            if e.is_cancellation() {
                e
            } else {
                ShareError::Unavailable {
                    height: header.height,
                    reason: e.to_string(),
                }
            }
        })?;

        self.validated.insert(header.data_hash, ()).await;
        Ok(())
    }
}
