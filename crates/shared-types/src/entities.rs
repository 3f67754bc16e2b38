//! # Core Domain Entities
//!
//! Addresses, identifiers and their canonical 32-byte word encodings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ParseError;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash (keccak-256 in this workspace).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style account address.
pub type Address = [u8; 20];

/// A 32-byte relay emitter address (relay networks use full-word emitters).
pub type EmitterAddress = [u8; 32];

/// Identifier of an execution domain (chain id or relay chain id).
pub type DomainId = u64;

/// The zero address. Mints are transfers from it, departures transfers to it.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Globally unique token identifier.
///
/// The value is `domain_tag * SEQUENCE_SPAN + sequence`; the split lives in
/// the allocator crate, this type only carries the number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u128);

impl TokenId {
    /// Raw numeric value.
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Encode as a big-endian 32-byte word.
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&self.0.to_be_bytes());
        word
    }

    /// Decode from a big-endian 32-byte word.
    ///
    /// Returns `None` when the upper half is non-zero (value does not fit).
    pub fn from_word(word: &[u8; 32]) -> Option<Self> {
        if word[..16].iter().any(|&b| b != 0) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..]);
        Some(Self(u128::from_be_bytes(low)))
    }
}

impl From<u128> for TokenId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Left-pad an address into a 32-byte word.
pub fn address_to_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Extract an address from a left-padded 32-byte word.
///
/// Returns `None` when the 12 padding bytes are not zero.
pub fn address_from_word(word: &[u8; 32]) -> Option<Address> {
    if word[..12].iter().any(|&b| b != 0) {
        return None;
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[12..]);
    Some(address)
}

/// Encode a `u64` as a big-endian 32-byte word.
pub fn u64_to_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode a `U256` as a big-endian 32-byte word.
pub fn u256_to_word(value: &U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Widen an address into a `U256` (used when an address travels in an
/// integer field of a signed request).
pub fn address_to_u256(address: &Address) -> U256 {
    U256::from_big_endian(&address_to_word(address))
}

/// Format an address as `0x`-prefixed lowercase hex.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed (or bare) hex string into a fixed-size byte array.
pub fn parse_hex_array<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(ParseError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Parse an address from hex.
pub fn parse_address(input: &str) -> Result<Address, ParseError> {
    parse_hex_array::<20>(input)
}
