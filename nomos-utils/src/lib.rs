pub mod fisheryates;

/// Serde helpers that render byte payloads as hex for human readable formats
/// (json, yaml) and as raw bytes otherwise (bincode).
#[cfg(feature = "serde")]
pub mod serde {
    use std::borrow::Cow;

    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize_bytes_array<const N: usize, S: Serializer>(
        src: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serialize_bytes(src.as_slice(), serializer)
    }

    pub fn deserialize_bytes_array<'de, const N: usize, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let bytes = deserialize_bytes(deserializer)?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::invalid_length(bytes.len(), &format!("{N}").as_str()))
    }

    pub fn serialize_bytes<S: Serializer>(src: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            const_hex::encode(src).serialize(serializer)
        } else {
            serializer.serialize_bytes(src)
        }
    }

    pub fn deserialize_bytes<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        if deserializer.is_human_readable() {
            let s: Cow<str> = Cow::deserialize(deserializer)?;
            const_hex::decode(s.as_ref()).map_err(D::Error::custom)
        } else {
            <Vec<u8>>::deserialize(deserializer)
        }
    }

    /// `#[serde(with = "nomos_utils::serde::hex_bytes")]` for `Vec<u8>` fields.
    pub mod hex_bytes {
        pub use super::{deserialize_bytes as deserialize, serialize_bytes as serialize};
    }

    /// `#[serde(with = "nomos_utils::serde::hex_array")]` for `[u8; N]` fields.
    pub mod hex_array {
        use serde::{Deserializer, Serializer};

        pub fn serialize<const N: usize, S: Serializer>(
            src: &[u8; N],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            super::serialize_bytes_array(src, serializer)
        }

        pub fn deserialize<'de, const N: usize, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<[u8; N], D::Error> {
            super::deserialize_bytes_array(deserializer)
        }
    }

    /// `#[serde(with = "nomos_utils::serde::hex_hashes")]` for `Vec<[u8; 32]>` fields.
    pub mod hex_hashes {
        use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(src: &[[u8; 32]], serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.collect_seq(src.iter().map(const_hex::encode))
            } else {
                src.serialize(serializer)
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<[u8; 32]>, D::Error> {
            if deserializer.is_human_readable() {
                <Vec<String>>::deserialize(deserializer)?
                    .iter()
                    .map(|s| {
                        let mut output = [0u8; 32];
                        const_hex::decode_to_slice(s, &mut output)
                            .map(|_| output)
                            .map_err(D::Error::custom)
                    })
                    .collect()
            } else {
                <Vec<[u8; 32]>>::deserialize(deserializer)
            }
        }
    }

}
