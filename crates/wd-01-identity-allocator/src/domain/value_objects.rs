//! # Domain Value Objects
//!
//! Identifier layout: `domain_tag * SEQUENCE_SPAN + sequence`.

use serde::{Deserialize, Serialize};
use shared_types::TokenId;

/// Width of the per-domain sequence range. A domain tag of 137 owns
/// identifiers `137_000_000 ..= 137_999_999`.
pub const SEQUENCE_SPAN: u128 = 1_000_000;

/// Highest sequence representable inside one span.
pub const MAX_SEQUENCE: u64 = (SEQUENCE_SPAN - 1) as u64;

/// Split an identifier into `(domain_tag, sequence)`.
///
/// The tag is returned as `u128` so identifiers with absurd tags can still be
/// reported in errors.
pub fn split_token_id(token_id: TokenId) -> (u128, u64) {
    let tag = token_id.0 / SEQUENCE_SPAN;
    let sequence = (token_id.0 % SEQUENCE_SPAN) as u64;
    (tag, sequence)
}

/// The identifier namespace of one domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Tag embedded in the high-order digits.
    pub domain_tag: u64,
    /// Highest sequence accepted for this domain.
    pub max_sequence: u64,
}

impl Namespace {
    /// Namespace covering the full span.
    pub fn new(domain_tag: u64) -> Self {
        Self {
            domain_tag,
            max_sequence: MAX_SEQUENCE,
        }
    }

    /// Namespace with a lower sequence ceiling (clamped to the span).
    pub fn with_max_sequence(domain_tag: u64, max_sequence: u64) -> Self {
        Self {
            domain_tag,
            max_sequence: max_sequence.min(MAX_SEQUENCE),
        }
    }

    /// Identifier for `sequence` in this namespace.
    pub fn compose(&self, sequence: u64) -> TokenId {
        TokenId(self.domain_tag as u128 * SEQUENCE_SPAN + sequence as u128)
    }

    /// Highest identifier in this namespace.
    pub fn last_token_id(&self) -> TokenId {
        self.compose(self.max_sequence)
    }

    /// Whether the identifier carries this namespace's tag and an in-range
    /// sequence.
    pub fn contains(&self, token_id: TokenId) -> bool {
        let (tag, sequence) = split_token_id(token_id);
        tag == self.domain_tag as u128 && sequence >= 1 && sequence <= self.max_sequence
    }
}
