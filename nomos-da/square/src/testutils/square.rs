// Crates
use rand::{thread_rng, RngCore};
// Internal
use crate::eds::ExtendedDataSquare;
use crate::header::ExtendedHeader;
use crate::share::{Namespace, Share, NAMESPACE_SIZE, SHARE_SIZE};

/// Namespace filled with zeroes except for its last byte.
pub fn namespace(id: u8) -> Namespace {
    let mut bytes = [0u8; NAMESPACE_SIZE];
    bytes[NAMESPACE_SIZE - 1] = id;
    Namespace::new(bytes)
}

/// Share of `namespace` whose payload records its original coordinates.
pub fn share_at(namespace: Namespace, row: usize, col: usize) -> Share {
    let mut payload = Vec::with_capacity(16);
    payload.extend_from_slice(&(row as u64).to_be_bytes());
    payload.extend_from_slice(&(col as u64).to_be_bytes());
    Share::with_namespace(namespace, &payload).unwrap()
}

pub fn random_share() -> Share {
    let mut bytes = vec![0u8; SHARE_SIZE];
    thread_rng().fill_bytes(&mut bytes);
    Share::new(bytes).unwrap()
}

pub fn random_ods(k: usize) -> Vec<Share> {
    (0..k * k).map(|_| random_share()).collect()
}

/// Original square of distinct shares, all in the same namespace.
pub fn sequential_ods(k: usize) -> Vec<Share> {
    ods_from_namespaces(k, |_, _| namespace(1))
}

/// Original square where the namespace of each share is picked by its coordinates.
pub fn ods_from_namespaces(k: usize, f: impl Fn(usize, usize) -> Namespace) -> Vec<Share> {
    (0..k)
        .flat_map(|row| (0..k).map(move |col| (row, col)))
        .map(|(row, col)| share_at(f(row, col), row, col))
        .collect()
}

pub fn random_eds(k: usize) -> ExtendedDataSquare {
    ExtendedDataSquare::extend(random_ods(k)).unwrap()
}

pub fn header_for(height: u64, eds: &ExtendedDataSquare) -> ExtendedHeader {
    ExtendedHeader::new(height, eds.data_availability_header())
}
