//! # Outbound Ports
//!
//! The payment token ledger the sale collects from.

use crate::domain::PaymentError;
use shared_types::{Address, U256};

/// Fungible payment-token ledger - outbound port.
///
/// Implementations use interior mutability so the runtime and tests can hold
/// the same ledger the sale engine debits.
pub trait StableCoinLedger: Send + Sync {
    /// Decimals of `token`.
    fn decimals(&self, token: &Address) -> Result<u8, PaymentError>;

    /// Balance of `holder` in `token`.
    fn balance_of(&self, token: &Address, holder: &Address) -> U256;

    /// Amount `spender` may move out of `owner`'s balance.
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> U256;

    /// Move `amount` from `from` to `to` using `spender`'s allowance.
    fn transfer_from(
        &self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PaymentError>;

    /// Move `amount` from `from` to `to`.
    fn transfer(
        &self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PaymentError>;
}
