// std
use std::io::ErrorKind;
use std::path::Path;
// crates
use bytes::Bytes;
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncReadExt, AsyncWriteExt},
};
// internal

/// Read the blob stored under `blob_id`, `None` if it was never written.
pub async fn load_blob(base_dir: &Path, blob_id: &[u8]) -> Result<Option<Bytes>, std::io::Error> {
    let path = base_dir.join(hex::encode(blob_id));

    let mut file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            tracing::error!("Failed to open file {}: {}", path.display(), e);
            return Err(e);
        }
    };

    let mut contents = vec![];
    if let Err(e) = file.read_to_end(&mut contents).await {
        tracing::error!("Failed to read file {}: {}", path.display(), e);
        return Err(e);
    }

    Ok(Some(Bytes::from(contents)))
}

pub async fn write_blob(base_dir: &Path, blob_id: &[u8], data: &[u8]) -> Result<(), std::io::Error> {
    let path = base_dir.join(hex::encode(blob_id));

    tokio::fs::create_dir_all(base_dir).await?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        // Squares are immutable once committed, rewriting yields the same contents.
        .truncate(true)
        .open(path)
        .await?;

    file.write_all(data).await?;
    file.flush().await
}
