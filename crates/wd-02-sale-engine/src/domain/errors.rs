//! # Domain Errors
//!
//! Error types for the sale and the payment ledger it talks to.

use shared_types::{format_address, Address, U256};
use thiserror::Error;
use wd_01_identity_allocator::{AllocatorError, LedgerError};

/// Payment ledger errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Spender was not approved for enough.
    #[error("Insufficient allowance: required {required}, approved {available}")]
    InsufficientAllowance {
        /// Amount the transfer needs.
        required: U256,
        /// Amount currently approved.
        available: U256,
    },

    /// Payer balance too low.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer needs.
        required: U256,
        /// Payer balance.
        available: U256,
    },

    /// Token contract unknown to the ledger.
    #[error("Unknown payment token: {}", format_address(.0))]
    UnknownToken(Address),
}

/// Sale errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaleError {
    /// Token is not an accepted stable coin.
    #[error("Unknown stable coin: {}", format_address(.0))]
    UnknownStableCoin(Address),

    /// Zero identifiers requested.
    #[error("Count must be at least 1")]
    InvalidCount,

    /// Discount outside `[0, 10000)`.
    #[error("Invalid discount: {0} basis points")]
    InvalidDiscount(u32),

    /// Token decimals too large for the price math.
    #[error("Unsupported decimals {decimals} for token {}", format_address(.token))]
    UnsupportedDecimals {
        /// Payment token.
        token: Address,
        /// Reported decimals.
        decimals: u8,
    },

    /// Caller is not the sale administrator.
    #[error("Not authorized: {}", format_address(.0))]
    NotAuthorized(Address),

    /// Total cost does not fit 256 bits.
    #[error("Price overflow")]
    PriceOverflow,

    /// Payment collection failed.
    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    /// Allocation failed (supply ceiling).
    #[error("Allocation failed: {0}")]
    Allocator(#[from] AllocatorError),

    /// Ownership ledger rejected the mint.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl SaleError {
    /// Whether the buyer simply could not pay.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            SaleError::Payment(
                PaymentError::InsufficientAllowance { .. } | PaymentError::InsufficientBalance { .. }
            )
        )
    }

    /// Whether the supply ceiling was hit.
    pub fn is_supply_overflow(&self) -> bool {
        matches!(
            self,
            SaleError::Allocator(AllocatorError::SupplyOverflow { .. })
        )
    }
}
