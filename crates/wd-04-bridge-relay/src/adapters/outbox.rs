//! In-Memory Outbox Adapter
//!
//! Collects outbound messages for a relay process (or a test) to pick up.

use crate::domain::OutboundMessage;
use crate::ports::outbound::RelayOutbox;
use tracing::debug;

/// Outbox backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    pending: Vec<OutboundMessage>,
}

impl InMemoryOutbox {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages not yet taken.
    pub fn pending(&self) -> &[OutboundMessage] {
        &self.pending
    }

    /// Take every pending message.
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.pending)
    }
}

impl RelayOutbox for InMemoryOutbox {
    fn publish(&mut self, message: OutboundMessage) {
        debug!(
            "[wd-04] Queued message {} for domain {}",
            message.sequence, message.target_domain
        );
        self.pending.push(message);
    }
}
