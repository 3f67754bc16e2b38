//! # Protector Service
//!
//! Applies guardian mutations gated by the `AuthorizationVerifier`.
//!
//! Consumption has no undo, so every precondition on the token and the
//! guardian set is checked before the request is verified.

use crate::domain::{
    AuthError, Authority, AuthorizationVerifier, DomainSeparator, GuardianRegistry,
    LockTransition, ProtectedTransfer, ProtectorUpdate, SignedRequest,
};
use crate::ports::ProtectorApi;
use shared_types::{
    format_address, Address, DomainEvent, EventLog, Hash, Timestamp, TokenId, ZERO_ADDRESS,
};
use tracing::info;
use wd_01_identity_allocator::{LedgerError, TokenLedger};

/// Guardian management for one domain.
#[derive(Debug)]
pub struct ProtectorService {
    verifier: AuthorizationVerifier,
    guardians: GuardianRegistry,
}

impl ProtectorService {
    /// Create a service verifying against `domain`.
    pub fn new(domain: DomainSeparator) -> Self {
        Self {
            verifier: AuthorizationVerifier::new(domain),
            guardians: GuardianRegistry::new(),
        }
    }

    /// The request verifier.
    pub fn verifier(&self) -> &AuthorizationVerifier {
        &self.verifier
    }

    /// Guardian sets.
    pub fn guardians(&self) -> &GuardianRegistry {
        &self.guardians
    }

    /// Request `caller` must get signed for `update`.
    pub fn update_request(&self, caller: Address, update: &ProtectorUpdate) -> SignedRequest {
        update.to_request(caller, self.verifier.verifying_contract())
    }

    /// Request `caller` must get signed for `transfer`.
    pub fn transfer_request(&self, caller: Address, transfer: &ProtectedTransfer) -> SignedRequest {
        transfer.to_request(caller, self.verifier.verifying_contract())
    }

    /// Digest a signer signs to approve `request`.
    pub fn digest(&self, request: &SignedRequest) -> Hash {
        self.verifier.digest(request)
    }

    fn ensure_owner(
        ledger: &TokenLedger,
        caller: Address,
        token_id: TokenId,
    ) -> Result<(), AuthError> {
        if ledger.owner_of(token_id)? != caller {
            return Err(AuthError::NotTokenOwner { token_id, caller });
        }
        Ok(())
    }

    /// Authority class for `update` given the current guardian set.
    fn update_authority(&self, update: &ProtectorUpdate) -> Authority {
        let active = self.guardians.protectors_of(update.token_id);
        if update.active && active.is_empty() {
            Authority::Nominee(update.protector)
        } else {
            Authority::AnyProtector(active)
        }
    }
}

impl ProtectorApi for ProtectorService {
    fn set_protector(
        &mut self,
        ledger: &mut TokenLedger,
        caller: Address,
        update: &ProtectorUpdate,
        now: Timestamp,
        events: &mut EventLog,
    ) -> Result<(), AuthError> {
        let token_id = update.token_id;
        Self::ensure_owner(ledger, caller, token_id)?;

        if update.protector == ZERO_ADDRESS || update.protector == caller {
            return Err(AuthError::InvalidProtector(update.protector));
        }
        let already_active = self.guardians.is_active(token_id, &update.protector);
        if update.active && already_active {
            return Err(AuthError::ProtectorAlreadyActive(update.protector));
        }
        if !update.active && !already_active {
            return Err(AuthError::ProtectorNotFound(update.protector));
        }

        let authority = self.update_authority(update);
        let request = self.update_request(caller, update);
        self.verifier
            .verify_and_consume(&request, &update.signature, now, &authority)?;

        let transition = if update.active {
            self.guardians.activate(token_id, update.protector)
        } else {
            self.guardians.deactivate(token_id, &update.protector)
        }
        .unwrap_or(LockTransition::Unchanged);

        info!(
            "[wd-03] Protector {} {} for token {}",
            format_address(&update.protector),
            if update.active { "activated" } else { "deactivated" },
            token_id
        );
        events.emit(DomainEvent::ProtectorChange {
            token_id,
            protector: update.protector,
            active: update.active,
        });

        let locked = match transition {
            LockTransition::Locked => Some(true),
            LockTransition::Unlocked => Some(false),
            LockTransition::Unchanged => None,
        };
        if let Some(locked) = locked {
            ledger.set_locked(token_id, locked)?;
            info!("[wd-03] Token {} locked={}", token_id, locked);
            events.emit(DomainEvent::Locked { token_id, locked });
        }
        Ok(())
    }

    fn protected_transfer(
        &mut self,
        ledger: &mut TokenLedger,
        caller: Address,
        transfer: &ProtectedTransfer,
        now: Timestamp,
        events: &mut EventLog,
    ) -> Result<(), AuthError> {
        let token_id = transfer.token_id;
        Self::ensure_owner(ledger, caller, token_id)?;
        if transfer.to == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress.into());
        }
        if !self.guardians.has_protectors(token_id) {
            return Err(AuthError::NotLocked(token_id));
        }

        let authority = Authority::AnyProtector(self.guardians.protectors_of(token_id));
        let request = self.transfer_request(caller, transfer);
        self.verifier
            .verify_and_consume(&request, &transfer.signature, now, &authority)?;

        ledger.transfer_authorized(caller, transfer.to, token_id, events)?;

        for protector in self.guardians.reset(token_id) {
            events.emit(DomainEvent::ProtectorChange {
                token_id,
                protector,
                active: false,
            });
        }
        ledger.set_locked(token_id, false)?;
        events.emit(DomainEvent::Locked {
            token_id,
            locked: false,
        });

        info!(
            "[wd-03] Protected transfer of token {} to {}",
            token_id,
            format_address(&transfer.to)
        );
        Ok(())
    }

    fn protectors_of(&self, token_id: TokenId) -> Vec<Address> {
        self.guardians.protectors_of(token_id)
    }
}
