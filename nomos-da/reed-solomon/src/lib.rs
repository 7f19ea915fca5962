pub use reed_solomon_erasure::Error;
use reed_solomon_erasure::galois_8::ReedSolomon;

/// Reed Solomon encode a line of equally sized shards, returning the parity shards.
/// The parity ratio is fixed to 1, so `shards.len()` parity shards are produced.
///  # Arguments
/// * `shards` - Original shards of the line, all of the same length
pub fn encode_shards(shards: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, Error> {
    let shard_size = shards.first().map(Vec::len).unwrap_or(0);
    let mut encoded: Vec<Vec<u8>> = shards
        .iter()
        .cloned()
        .chain(std::iter::repeat(vec![0; shard_size]).take(shards.len()))
        .collect();
    let encoder = ReedSolomon::new(shards.len(), shards.len())?;
    encoder.encode(&mut encoded)?;
    Ok(encoded.split_off(shards.len()))
}

/// Reed Solomon reconstruct the missing shards of an extended line in place.
/// # Arguments
/// * `original_size` - Number of original shards in the line (half of `shards.len()`)
/// * `shards` - Extended line, with `None` for every missing shard
pub fn reconstruct_shards(
    original_size: usize,
    shards: &mut [Option<Vec<u8>>],
) -> Result<(), Error> {
    let decoder = ReedSolomon::new(original_size, shards.len() - original_size)?;
    decoder.reconstruct(shards)
}
