//! # Bridge Relay Service
//!
//! Inbound: authenticate, deduplicate, validate, then apply. Every check runs
//! before the `(emitter, sequence)` pair is recorded, so a rejected message
//! can be re-delivered once the cause is fixed (for example after the
//! emitter is trusted).
//!
//! Outbound: escrow the token locally and publish a payload with the next
//! sequence of this domain's emitter.

use crate::domain::{
    AppliedMessages, BridgeError, BridgeMessage, OutboundMessage, ReceiveOutcome,
    TransferPayload, TrustedEmitters, TrustedRelay,
};
use crate::ports::{BridgeApi, RelayOutbox};
use shared_types::{
    format_address, Address, DomainEvent, DomainId, EmitterAddress, EventLog, TokenId,
    ZERO_ADDRESS,
};
use tracing::{debug, info, warn};
use wd_01_identity_allocator::{Custody, IdentityAllocatorApi, TokenLedger};

/// Bridge endpoint of one domain.
pub struct BridgeRelay<O: RelayOutbox> {
    local_domain: DomainId,
    emitter: EmitterAddress,
    trusted: TrustedEmitters,
    applied: AppliedMessages,
    next_outbound_sequence: u64,
    outbox: O,
}

impl<O: RelayOutbox> BridgeRelay<O> {
    /// Create a relay endpoint for `local_domain`, publishing as `emitter`.
    pub fn new(local_domain: DomainId, emitter: EmitterAddress, outbox: O) -> Self {
        Self {
            local_domain,
            emitter,
            trusted: TrustedEmitters::new(),
            applied: AppliedMessages::new(),
            next_outbound_sequence: 0,
            outbox,
        }
    }

    /// Trust `relay` for its domain.
    pub fn trust(&mut self, relay: TrustedRelay) {
        info!(
            "[wd-04] Trusting emitter 0x{} for domain {} (tag {})",
            hex::encode(relay.emitter),
            relay.domain,
            relay.namespace.domain_tag
        );
        self.trusted.register(relay);
    }

    /// Trusted relays.
    pub fn trusted(&self) -> &TrustedEmitters {
        &self.trusted
    }

    /// Applied message keys.
    pub fn applied(&self) -> &AppliedMessages {
        &self.applied
    }

    /// Sequence the next outbound message will carry.
    pub fn next_outbound_sequence(&self) -> u64 {
        self.next_outbound_sequence
    }

    /// This domain's emitter.
    pub fn emitter(&self) -> EmitterAddress {
        self.emitter
    }

    /// Outbound message sink.
    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// Mutable outbound message sink.
    pub fn outbox_mut(&mut self) -> &mut O {
        &mut self.outbox
    }

    /// Check that `token_id` may arrive from `relay`'s domain.
    ///
    /// A token known here must be in transit to exactly that domain. An
    /// unknown token must belong to that domain's namespace.
    fn validate_arrival(
        &self,
        ledger: &TokenLedger,
        allocator: &dyn IdentityAllocatorApi,
        token_id: TokenId,
        relay: &TrustedRelay,
    ) -> Result<bool, BridgeError> {
        match ledger.record(token_id).map(|record| record.custody) {
            Some(Custody::InTransit(target)) if target == relay.domain => Ok(true),
            Some(_) => Err(BridgeError::NotInTransitFrom {
                token_id,
                source_domain: relay.domain,
            }),
            None => {
                allocator.validate_foreign(token_id, &relay.namespace)?;
                Ok(false)
            }
        }
    }
}

impl<O: RelayOutbox> BridgeApi for BridgeRelay<O> {
    fn receive_message(
        &mut self,
        ledger: &mut TokenLedger,
        allocator: &dyn IdentityAllocatorApi,
        message: &BridgeMessage,
        events: &mut EventLog,
    ) -> Result<ReceiveOutcome, BridgeError> {
        let payload = TransferPayload::decode(&message.payload)?;

        let relay = self
            .trusted
            .authenticate(message.source_domain, &message.source_emitter)
            .ok_or_else(|| {
                warn!(
                    "[wd-04] Untrusted emitter 0x{} for domain {}",
                    hex::encode(message.source_emitter),
                    message.source_domain
                );
                BridgeError::UntrustedEmitter {
                    domain: message.source_domain,
                    emitter: message.source_emitter,
                }
            })?;

        if self
            .applied
            .contains(&message.source_emitter, message.sequence_nonce)
        {
            debug!(
                "[wd-04] Re-delivery of sequence {} from domain {}",
                message.sequence_nonce, message.source_domain
            );
            return Err(BridgeError::MessageAlreadyApplied {
                emitter: message.source_emitter,
                sequence: message.sequence_nonce,
            });
        }

        if payload.recipient == ZERO_ADDRESS {
            return Err(BridgeError::InvalidRecipient(payload.recipient));
        }
        let returning = self.validate_arrival(ledger, allocator, payload.token_id, relay)?;

        self.applied
            .record(message.source_emitter, message.sequence_nonce);

        let outcome = if returning {
            ledger.finalize_arrival(payload.token_id, payload.recipient, events)?;
            ReceiveOutcome::Finalized {
                token_id: payload.token_id,
                recipient: payload.recipient,
            }
        } else {
            ledger.mint(payload.recipient, payload.token_id, events)?;
            ReceiveOutcome::Minted {
                token_id: payload.token_id,
                recipient: payload.recipient,
            }
        };

        info!(
            "[wd-04] Applied sequence {} from domain {}: token {} -> {}",
            message.sequence_nonce,
            message.source_domain,
            payload.token_id,
            format_address(&payload.recipient)
        );
        events.emit(DomainEvent::CrossDomainReceived {
            token_id: payload.token_id,
            recipient: payload.recipient,
            source_domain: message.source_domain,
            sequence_nonce: message.sequence_nonce,
        });
        Ok(outcome)
    }

    fn send_cross_domain(
        &mut self,
        ledger: &mut TokenLedger,
        allocator: &dyn IdentityAllocatorApi,
        caller: Address,
        token_id: TokenId,
        target_domain: DomainId,
        recipient: Address,
        events: &mut EventLog,
    ) -> Result<OutboundMessage, BridgeError> {
        let relay = match self.trusted.get(target_domain) {
            Some(relay) if target_domain != self.local_domain => relay,
            _ => return Err(BridgeError::UnknownDomain(target_domain)),
        };
        if !allocator.is_local(token_id) && !relay.namespace.contains(token_id) {
            warn!(
                "[wd-04] Refusing to send token {} to domain {}: foreign namespace",
                token_id, target_domain
            );
            return Err(BridgeError::ForeignNamespace {
                token_id,
                target_domain,
            });
        }
        if recipient == ZERO_ADDRESS {
            return Err(BridgeError::InvalidRecipient(recipient));
        }

        ledger.escrow(caller, token_id, target_domain, events)?;

        let sequence = self.next_outbound_sequence;
        self.next_outbound_sequence += 1;
        let message = OutboundMessage {
            target_domain,
            emitter: self.emitter,
            sequence,
            payload: TransferPayload {
                recipient,
                token_id,
            }
            .encode(),
        };
        self.outbox.publish(message.clone());

        info!(
            "[wd-04] Sent token {} to domain {} (sequence {})",
            token_id, target_domain, sequence
        );
        events.emit(DomainEvent::CrossDomainSent {
            token_id,
            recipient,
            target_domain,
            sequence,
        });
        Ok(message)
    }
}
