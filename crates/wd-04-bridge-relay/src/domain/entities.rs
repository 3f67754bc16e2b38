//! # Domain Entities
//!
//! Inbound and outbound relay messages.

use serde::{Deserialize, Serialize};
use shared_types::{hex_serde, Address, DomainId, EmitterAddress, TokenId};
use wd_01_identity_allocator::Namespace;

/// A message delivered by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// Encoded `TransferPayload`.
    #[serde(with = "hex_serde::bytes")]
    pub payload: Vec<u8>,
    /// Relay emitter that produced the message.
    #[serde(with = "hex_serde")]
    pub source_emitter: EmitterAddress,
    /// Domain the message claims to come from.
    pub source_domain: DomainId,
    /// Per-emitter sequence number.
    pub sequence_nonce: u64,
}

/// The relay trusted for one remote domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedRelay {
    /// Remote domain.
    pub domain: DomainId,
    /// Emitter whose messages are accepted for that domain.
    #[serde(with = "hex_serde")]
    pub emitter: EmitterAddress,
    /// Namespace the remote domain allocates from.
    pub namespace: Namespace,
}

/// A message this domain hands to the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Destination domain.
    pub target_domain: DomainId,
    /// This domain's emitter.
    #[serde(with = "hex_serde")]
    pub emitter: EmitterAddress,
    /// Per-emitter sequence number.
    pub sequence: u64,
    /// Encoded `TransferPayload`.
    #[serde(with = "hex_serde::bytes")]
    pub payload: Vec<u8>,
}

/// What applying a relayed message did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiveOutcome {
    /// Token was unknown here and has been minted.
    Minted {
        /// Token id.
        token_id: TokenId,
        /// New owner.
        recipient: Address,
    },
    /// Token was in transit from here and is back with a local owner.
    Finalized {
        /// Token id.
        token_id: TokenId,
        /// New owner.
        recipient: Address,
    },
}

impl ReceiveOutcome {
    /// Token the message moved.
    pub fn token_id(&self) -> TokenId {
        match self {
            ReceiveOutcome::Minted { token_id, .. } | ReceiveOutcome::Finalized { token_id, .. } => {
                *token_id
            }
        }
    }
}
