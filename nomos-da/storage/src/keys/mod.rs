use bytes::{Bytes, BytesMut};

// "DA/SQUARE/" PREFIX
pub const DA_SQUARE_PREFIX: &str = "da/square/";

// "DA/SHARE/" PREFIX
pub const DA_SHARE_PREFIX: &str = "da/share/";

pub fn key_bytes(prefix: &str, id: impl AsRef<[u8]>) -> Bytes {
    let mut buffer = BytesMut::new();

    buffer.extend_from_slice(prefix.as_bytes());
    buffer.extend_from_slice(id.as_ref());

    buffer.freeze()
}

// Combines a 32-byte data root (`[u8; 32]`) with the row and column of a share
// (`u16` each, big endian).
#[must_use]
pub fn create_share_idx(data_hash: &[u8; 32], row: u16, col: u16) -> [u8; 36] {
    let mut share_idx = [0u8; 36];
    share_idx[..32].copy_from_slice(data_hash);
    share_idx[32..34].copy_from_slice(&row.to_be_bytes());
    share_idx[34..].copy_from_slice(&col.to_be_bytes());

    share_idx
}

#[must_use]
pub fn square_key(data_hash: &[u8; 32]) -> Bytes {
    key_bytes(DA_SQUARE_PREFIX, data_hash)
}

#[must_use]
pub fn share_key(data_hash: &[u8; 32], row: u16, col: u16) -> Bytes {
    key_bytes(DA_SHARE_PREFIX, create_share_idx(data_hash, row, col))
}
