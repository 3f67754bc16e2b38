//! # Inbound Ports
//!
//! API trait defining what the Bridge Relay can do.

use crate::domain::{BridgeError, BridgeMessage, OutboundMessage, ReceiveOutcome};
use shared_types::{Address, DomainId, EventLog, TokenId};
use wd_01_identity_allocator::{IdentityAllocatorApi, TokenLedger};

/// Bridge API - inbound port.
pub trait BridgeApi {
    /// Apply a relayed ownership message exactly once.
    fn receive_message(
        &mut self,
        ledger: &mut TokenLedger,
        allocator: &dyn IdentityAllocatorApi,
        message: &BridgeMessage,
        events: &mut EventLog,
    ) -> Result<ReceiveOutcome, BridgeError>;

    /// Escrow a token and publish a message moving it to `target_domain`.
    /// Only tokens of this domain's namespace or the target's may leave.
    #[allow(clippy::too_many_arguments)]
    fn send_cross_domain(
        &mut self,
        ledger: &mut TokenLedger,
        allocator: &dyn IdentityAllocatorApi,
        caller: Address,
        token_id: TokenId,
        target_domain: DomainId,
        recipient: Address,
        events: &mut EventLog,
    ) -> Result<OutboundMessage, BridgeError>;
}
