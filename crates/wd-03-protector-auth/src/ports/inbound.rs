//! # Inbound Ports
//!
//! API trait defining what the Protector subsystem can do.

use crate::domain::{AuthError, ProtectedTransfer, ProtectorUpdate};
use shared_types::{Address, EventLog, Timestamp, TokenId};
use wd_01_identity_allocator::TokenLedger;

/// Protector API - inbound port.
pub trait ProtectorApi {
    /// Activate or deactivate a protector of a token the caller owns.
    fn set_protector(
        &mut self,
        ledger: &mut TokenLedger,
        caller: Address,
        update: &ProtectorUpdate,
        now: Timestamp,
        events: &mut EventLog,
    ) -> Result<(), AuthError>;

    /// Move a locked token with a protector's signed approval.
    fn protected_transfer(
        &mut self,
        ledger: &mut TokenLedger,
        caller: Address,
        transfer: &ProtectedTransfer,
        now: Timestamp,
        events: &mut EventLog,
    ) -> Result<(), AuthError>;

    /// Active protectors of a token.
    fn protectors_of(&self, token_id: TokenId) -> Vec<Address>;
}
