//! # Trusted Emitters
//!
//! One trusted relay per remote domain, with the identifier namespace that
//! domain allocates from.

use super::entities::TrustedRelay;
use shared_types::{DomainId, EmitterAddress};
use std::collections::BTreeMap;

/// Trusted relays keyed by domain.
#[derive(Debug, Default)]
pub struct TrustedEmitters {
    relays: BTreeMap<DomainId, TrustedRelay>,
}

impl TrustedEmitters {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust `relay`, replacing any previous relay for its domain.
    pub fn register(&mut self, relay: TrustedRelay) -> Option<TrustedRelay> {
        self.relays.insert(relay.domain, relay)
    }

    /// Relay of `domain`.
    pub fn get(&self, domain: DomainId) -> Option<&TrustedRelay> {
        self.relays.get(&domain)
    }

    /// Relay of `domain` if `emitter` is the one trusted for it.
    pub fn authenticate(&self, domain: DomainId, emitter: &EmitterAddress) -> Option<&TrustedRelay> {
        self.relays
            .get(&domain)
            .filter(|relay| &relay.emitter == emitter)
    }

    /// Trusted domains.
    pub fn domains(&self) -> Vec<DomainId> {
        self.relays.keys().copied().collect()
    }
}
