//! # Applied Messages
//!
//! `(emitter, sequence)` pairs already applied on this domain. A relay
//! delivers at least once; this set turns that into exactly once.

use shared_types::EmitterAddress;
use std::collections::HashSet;

/// Applied message keys. Never pruned.
#[derive(Debug, Default)]
pub struct AppliedMessages {
    keys: HashSet<(EmitterAddress, u64)>,
}

impl AppliedMessages {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pair was applied.
    pub fn contains(&self, emitter: &EmitterAddress, sequence: u64) -> bool {
        self.keys.contains(&(*emitter, sequence))
    }

    /// Record the pair. Returns `false` if it was already present.
    pub fn record(&mut self, emitter: EmitterAddress, sequence: u64) -> bool {
        self.keys.insert((emitter, sequence))
    }

    /// Number of applied messages.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing was applied yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
