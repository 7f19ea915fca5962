// std
use std::fmt::{Debug, Display, Formatter};
// crates
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
// internal
use crate::SquareError;

pub const SHARE_SIZE: usize = 512;
pub const NAMESPACE_SIZE: usize = 29;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace(#[serde(with = "nomos_utils::serde::hex_array")] [u8; NAMESPACE_SIZE]);

impl Namespace {
    /// Namespace every parity share is attributed to.
    pub const PARITY: Self = Self([0xFF; NAMESPACE_SIZE]);

    #[must_use]
    pub const fn new(bytes: [u8; NAMESPACE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SquareError> {
        <[u8; NAMESPACE_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| SquareError::InvalidNamespaceSize(bytes.len()))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_parity(&self) -> bool {
        *self == Self::PARITY
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", const_hex::encode(self.0))
    }
}

impl Debug for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Namespace({self})")
    }
}

impl AsRef<[u8]> for Namespace {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Atomic unit of a data square: `SHARE_SIZE` bytes led by its namespace.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Share(Vec<u8>);

impl Share {
    pub fn new(bytes: Vec<u8>) -> Result<Self, SquareError> {
        if bytes.len() != SHARE_SIZE {
            return Err(SquareError::InvalidShareSize(bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// Builds a share out of a namespace and a payload, zero padded up to `SHARE_SIZE`.
    pub fn with_namespace(namespace: Namespace, payload: &[u8]) -> Result<Self, SquareError> {
        if payload.len() > SHARE_SIZE - NAMESPACE_SIZE {
            return Err(SquareError::PayloadTooLarge(payload.len()));
        }
        let mut bytes = Vec::with_capacity(SHARE_SIZE);
        bytes.extend_from_slice(namespace.as_bytes());
        bytes.extend_from_slice(payload);
        bytes.resize(SHARE_SIZE, 0);
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn namespace(&self) -> Namespace {
        let mut bytes = [0u8; NAMESPACE_SIZE];
        bytes.copy_from_slice(&self.0[..NAMESPACE_SIZE]);
        Namespace(bytes)
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.0[NAMESPACE_SIZE..]
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Share {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Share {
    type Error = SquareError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Debug for Share {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("namespace", &self.namespace())
            .field("len", &self.0.len())
            .finish()
    }
}

impl Serialize for Share {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        nomos_utils::serde::serialize_bytes(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Share {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = nomos_utils::serde::deserialize_bytes(deserializer)?;
        Self::new(bytes).map_err(D::Error::custom)
    }
}
