//! # Domain Invariants
//!
//! Business rules for sale configuration and purchases.

use super::errors::SaleError;
use shared_types::Address;

/// One basis point denominator.
pub const BASIS_POINTS: u32 = 10_000;

/// Largest token decimals the price math accepts.
pub const MAX_DECIMALS: u8 = 36;

/// Invariant: discount is strictly below 100%.
pub fn invariant_discount_range(basis_points: u32) -> Result<(), SaleError> {
    if basis_points >= BASIS_POINTS {
        return Err(SaleError::InvalidDiscount(basis_points));
    }
    Ok(())
}

/// Invariant: at least one identifier per purchase.
pub fn invariant_positive_count(count: u64) -> Result<(), SaleError> {
    if count == 0 {
        return Err(SaleError::InvalidCount);
    }
    Ok(())
}

/// Invariant: token decimals fit the 256-bit price math.
pub fn invariant_supported_decimals(token: Address, decimals: u8) -> Result<(), SaleError> {
    if decimals > MAX_DECIMALS {
        return Err(SaleError::UnsupportedDecimals { token, decimals });
    }
    Ok(())
}
