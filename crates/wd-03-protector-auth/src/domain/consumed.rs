//! # Consumed Signatures
//!
//! Append-only set of request digests that have authorized a mutation.

use shared_types::Hash;
use std::collections::HashSet;

/// Digests already used. Never pruned.
#[derive(Debug, Default)]
pub struct ConsumedSignatures {
    digests: HashSet<Hash>,
}

impl ConsumedSignatures {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `digest` was consumed.
    pub fn contains(&self, digest: &Hash) -> bool {
        self.digests.contains(digest)
    }

    /// Record `digest`. Returns `false` if it was already present.
    pub fn consume(&mut self, digest: Hash) -> bool {
        self.digests.insert(digest)
    }

    /// Number of consumed digests.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether nothing was consumed yet.
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
