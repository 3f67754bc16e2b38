//! # Domain Events
//!
//! Observable notifications emitted by the subsystems. Every state change an
//! external consumer can watch (ownership, protectors, locking, pricing,
//! bridge traffic) is recorded here in emission order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{Address, DomainId, TokenId, U256};

/// Event emitted by a successful operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Ownership created or moved. Mints come from the zero address,
    /// departures to another domain go to it.
    Transfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
    /// A protector was activated or deactivated for a token.
    ProtectorChange {
        token_id: TokenId,
        protector: Address,
        active: bool,
    },
    /// The locked flag of a token flipped.
    Locked { token_id: TokenId, locked: bool },
    /// Base price changed (cents).
    PriceSet { cents: u32 },
    /// Discount changed (basis points).
    DiscountSet { basis_points: u32 },
    /// A payment token was accepted or removed.
    StableCoinSet { token: Address, active: bool },
    /// Supply ceiling changed.
    MaxTokenIdSet { max_token_id: TokenId },
    /// Sale proceeds moved to a beneficiary.
    ProceedsWithdrawn {
        token: Address,
        beneficiary: Address,
        amount: U256,
    },
    /// A relayed message was applied.
    CrossDomainReceived {
        token_id: TokenId,
        recipient: Address,
        source_domain: DomainId,
        sequence_nonce: u64,
    },
    /// A token left for another domain.
    CrossDomainSent {
        token_id: TokenId,
        recipient: Address,
        target_domain: DomainId,
        sequence: u64,
    },
}

/// Append-only log of emitted events.
///
/// Subsystems receive `&mut EventLog` and only push after their mutation has
/// fully succeeded, so a failed call never leaves events behind.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<DomainEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn emit(&mut self, event: DomainEvent) {
        debug!(?event, "event emitted");
        self.events.push(event);
    }

    /// All events recorded so far.
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}
