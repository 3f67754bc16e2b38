//! # Token Ledger
//!
//! Ownership index for every token known to this domain. A token is either
//! held by a local owner or in transit to another domain (escrowed here
//! until a relayed message brings it back).

use super::errors::LedgerError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, DomainEvent, DomainId, EventLog, TokenId, ZERO_ADDRESS};
use std::collections::HashMap;
use tracing::{debug, info};

/// Where a token currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Custody {
    /// Held by a local owner.
    Held(Address),
    /// Sent to another domain; no local owner until it returns.
    InTransit(DomainId),
}

/// Ledger entry for one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Current custody.
    pub custody: Custody,
    /// Set while at least one protector is active.
    pub locked: bool,
}

/// Ownership index.
#[derive(Debug, Default)]
pub struct TokenLedger {
    tokens: HashMap<TokenId, TokenRecord>,
    balances: HashMap<Address, usize>,
}

impl TokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the token is known locally (held or in transit).
    pub fn exists(&self, token_id: TokenId) -> bool {
        self.tokens.contains_key(&token_id)
    }

    /// Ledger entry for a token.
    pub fn record(&self, token_id: TokenId) -> Option<&TokenRecord> {
        self.tokens.get(&token_id)
    }

    /// Current local owner.
    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, LedgerError> {
        let record = self
            .tokens
            .get(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        match record.custody {
            Custody::Held(owner) => Ok(owner),
            Custody::InTransit(target_domain) => Err(LedgerError::InTransit {
                token_id,
                target_domain,
            }),
        }
    }

    /// Number of tokens held by `owner`.
    pub fn balance_of(&self, owner: &Address) -> usize {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Total tokens known locally.
    pub fn total_known(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the token is locked.
    pub fn is_locked(&self, token_id: TokenId) -> bool {
        self.tokens.get(&token_id).is_some_and(|r| r.locked)
    }

    /// Create a token owned by `to`.
    pub fn mint(
        &mut self,
        to: Address,
        token_id: TokenId,
        events: &mut EventLog,
    ) -> Result<(), LedgerError> {
        if to == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress);
        }
        if self.tokens.contains_key(&token_id) {
            return Err(LedgerError::TokenAlreadyExists(token_id));
        }
        self.tokens.insert(
            token_id,
            TokenRecord {
                custody: Custody::Held(to),
                locked: false,
            },
        );
        *self.balances.entry(to).or_default() += 1;
        debug!("[wd-01] Minted token {} to {:02x}{:02x}...", token_id, to[0], to[1]);
        events.emit(DomainEvent::Transfer {
            from: ZERO_ADDRESS,
            to,
            token_id,
        });
        Ok(())
    }

    /// Owner-initiated transfer. Refused while locked.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        token_id: TokenId,
        events: &mut EventLog,
    ) -> Result<(), LedgerError> {
        self.ensure_owner(caller, token_id)?;
        if self.is_locked(token_id) {
            return Err(LedgerError::TokenLocked(token_id));
        }
        self.move_token(caller, to, token_id, events)
    }

    /// Transfer that ignores the lock. Only called after a protector has
    /// authorized the move.
    pub fn transfer_authorized(
        &mut self,
        caller: Address,
        to: Address,
        token_id: TokenId,
        events: &mut EventLog,
    ) -> Result<(), LedgerError> {
        self.ensure_owner(caller, token_id)?;
        self.move_token(caller, to, token_id, events)
    }

    /// Move an unlocked token into transit towards `target_domain`.
    ///
    /// Returns the previous owner.
    pub fn escrow(
        &mut self,
        caller: Address,
        token_id: TokenId,
        target_domain: DomainId,
        events: &mut EventLog,
    ) -> Result<Address, LedgerError> {
        self.ensure_owner(caller, token_id)?;
        if self.is_locked(token_id) {
            return Err(LedgerError::TokenLocked(token_id));
        }
        if let Some(record) = self.tokens.get_mut(&token_id) {
            record.custody = Custody::InTransit(target_domain);
        }
        self.decrement_balance(&caller);
        info!(
            "[wd-01] Token {} escrowed for domain {}",
            token_id, target_domain
        );
        events.emit(DomainEvent::Transfer {
            from: caller,
            to: ZERO_ADDRESS,
            token_id,
        });
        Ok(caller)
    }

    /// Hand an in-transit token to its new owner.
    pub fn finalize_arrival(
        &mut self,
        token_id: TokenId,
        recipient: Address,
        events: &mut EventLog,
    ) -> Result<(), LedgerError> {
        if recipient == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress);
        }
        let record = self
            .tokens
            .get_mut(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        if !matches!(record.custody, Custody::InTransit(_)) {
            return Err(LedgerError::NotInTransit(token_id));
        }
        record.custody = Custody::Held(recipient);
        *self.balances.entry(recipient).or_default() += 1;
        events.emit(DomainEvent::Transfer {
            from: ZERO_ADDRESS,
            to: recipient,
            token_id,
        });
        Ok(())
    }

    /// Set the locked flag. Returns whether the flag changed.
    pub fn set_locked(&mut self, token_id: TokenId, locked: bool) -> Result<bool, LedgerError> {
        let record = self
            .tokens
            .get_mut(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        let changed = record.locked != locked;
        record.locked = locked;
        Ok(changed)
    }

    fn ensure_owner(&self, caller: Address, token_id: TokenId) -> Result<(), LedgerError> {
        let owner = self.owner_of(token_id)?;
        if owner != caller {
            return Err(LedgerError::NotOwner { token_id, caller });
        }
        Ok(())
    }

    fn move_token(
        &mut self,
        from: Address,
        to: Address,
        token_id: TokenId,
        events: &mut EventLog,
    ) -> Result<(), LedgerError> {
        if to == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress);
        }
        if let Some(record) = self.tokens.get_mut(&token_id) {
            record.custody = Custody::Held(to);
        }
        self.decrement_balance(&from);
        *self.balances.entry(to).or_default() += 1;
        events.emit(DomainEvent::Transfer { from, to, token_id });
        Ok(())
    }

    fn decrement_balance(&mut self, owner: &Address) {
        if let Some(balance) = self.balances.get_mut(owner) {
            *balance = balance.saturating_sub(1);
        }
    }
}
