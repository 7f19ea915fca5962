// std
use std::path::PathBuf;
// crates
use nomos_da_square::{ExtendedDataSquare, Hash, Share};
use nomos_da_storage::{
    fs::{load_blob, write_blob},
    keys::{share_key, square_key},
};
use serde::{Deserialize, Serialize};
// internal
use crate::error::DynError;
use crate::storage::SquareStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsStoreSettings {
    pub directory: PathBuf,
}

/// Keeps every square and share in its own file under a single directory.
/// Squares are bincode encoded, shares are written raw.
pub struct FsStore {
    settings: FsStoreSettings,
}

fn coordinate(value: usize) -> Result<u16, DynError> {
    u16::try_from(value).map_err(|e| Box::new(e) as DynError)
}

#[async_trait::async_trait]
impl SquareStore for FsStore {
    type Settings = FsStoreSettings;

    fn new(settings: Self::Settings) -> Self {
        Self { settings }
    }

    async fn get_square(&self, data_hash: &Hash) -> Result<Option<ExtendedDataSquare>, DynError> {
        let Some(bytes) = load_blob(&self.settings.directory, &square_key(data_hash)).await? else {
            return Ok(None);
        };
        Ok(Some(bincode::deserialize(&bytes)?))
    }

    async fn put_square(
        &self,
        data_hash: &Hash,
        square: &ExtendedDataSquare,
    ) -> Result<(), DynError> {
        let bytes = bincode::serialize(square)?;
        write_blob(&self.settings.directory, &square_key(data_hash), &bytes).await?;
        Ok(())
    }

    async fn get_share(
        &self,
        data_hash: &Hash,
        row: usize,
        col: usize,
    ) -> Result<Option<Share>, DynError> {
        let key = share_key(data_hash, coordinate(row)?, coordinate(col)?);
        let Some(bytes) = load_blob(&self.settings.directory, &key).await? else {
            return Ok(None);
        };
        Ok(Some(Share::new(bytes.to_vec())?))
    }

    async fn put_share(
        &self,
        data_hash: &Hash,
        row: usize,
        col: usize,
        share: &Share,
    ) -> Result<(), DynError> {
        let key = share_key(data_hash, coordinate(row)?, coordinate(col)?);
        write_blob(&self.settings.directory, &key, share.as_bytes()).await?;
        Ok(())
    }
}
