//! Serde helpers that read and write fixed byte arrays as `0x` hex strings.
//!
//! ```ignore
//! #[serde(with = "shared_types::hex_serde")]
//! pub admin: Address,
//! ```

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

use crate::entities::parse_hex_array;

/// Serialize a byte array as `0x`-prefixed hex.
pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

/// Deserialize a byte array from (optionally `0x`-prefixed) hex.
pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_hex_array::<N>(&text).map_err(D::Error::custom)
}

/// Variable-length byte strings as hex.
pub mod bytes {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serialize a byte vector as `0x`-prefixed hex.
    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    /// Deserialize a byte vector from (optionally `0x`-prefixed) hex.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let trimmed = text.strip_prefix("0x").unwrap_or(&text);
        hex::decode(trimmed).map_err(D::Error::custom)
    }
}
