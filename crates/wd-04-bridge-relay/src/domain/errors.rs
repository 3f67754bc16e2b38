//! # Domain Errors
//!
//! Error types for relayed message handling.

use shared_types::{format_address, Address, DomainId, EmitterAddress, TokenId};
use thiserror::Error;
use wd_01_identity_allocator::{AllocatorError, LedgerError};

/// Bridge errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// Payload does not decode to `(recipient, token id)`.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Emitter is not the trusted relay of the claimed source domain.
    #[error("Untrusted emitter 0x{} for domain {domain}", hex::encode(.emitter))]
    UntrustedEmitter {
        /// Claimed source domain.
        domain: DomainId,
        /// Emitter that delivered the message.
        emitter: EmitterAddress,
    },

    /// `(emitter, sequence)` pair already applied.
    #[error("Message already applied: emitter 0x{}, sequence {sequence}", hex::encode(.emitter))]
    MessageAlreadyApplied {
        /// Source emitter.
        emitter: EmitterAddress,
        /// Sequence nonce.
        sequence: u64,
    },

    /// Outbound target is not a trusted domain.
    #[error("Unknown target domain: {0}")]
    UnknownDomain(DomainId),

    /// Token belongs neither to this domain nor to the target, so the target
    /// would refuse it.
    #[error("Token {token_id} cannot be sent to domain {target_domain}: foreign namespace")]
    ForeignNamespace {
        /// Token in question.
        token_id: TokenId,
        /// Requested target.
        target_domain: DomainId,
    },

    /// Token exists locally but is not waiting for a return from the
    /// message's source domain.
    #[error("Token {token_id} is not in transit from domain {source_domain}")]
    NotInTransitFrom {
        /// Token in question.
        token_id: TokenId,
        /// Claimed source domain.
        source_domain: DomainId,
    },

    /// Relayed recipient is the zero address.
    #[error("Invalid recipient: {}", format_address(.0))]
    InvalidRecipient(Address),

    /// Identifier failed namespace validation.
    #[error("Invalid token id: {0}")]
    Allocator(#[from] AllocatorError),

    /// Ownership ledger rejected the transition.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl BridgeError {
    /// Steady-state outcomes of an at-least-once relay: re-deliveries and
    /// deliveries from emitters nobody configured. Logged below `error`.
    pub fn is_delivery_noise(&self) -> bool {
        matches!(
            self,
            BridgeError::MessageAlreadyApplied { .. } | BridgeError::UntrustedEmitter { .. }
        )
    }

    /// Whether the identifier failed namespace validation.
    pub fn is_invalid_token_id(&self) -> bool {
        matches!(
            self,
            BridgeError::Allocator(AllocatorError::InvalidTokenId { .. })
        )
    }
}
