//! # Pricing
//!
//! `cents * (10000 - bps) * 10^decimals / (10000 * 100)`, evaluated in
//! 256-bit integers with one truncating division at the end.

use super::errors::SaleError;
use super::invariants::BASIS_POINTS;
use shared_types::U256;

/// Cents per whole unit of a stable coin.
const CENTS_PER_UNIT: u32 = 100;

/// Price of one identifier in the smallest unit of a token with `decimals`.
pub fn compute_final_price(
    base_price_cents: u32,
    discount_bps: u32,
    decimals: u8,
) -> Result<U256, SaleError> {
    if discount_bps >= BASIS_POINTS {
        return Err(SaleError::InvalidDiscount(discount_bps));
    }
    let scale = U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .ok_or(SaleError::PriceOverflow)?;
    let numerator = U256::from(base_price_cents)
        .checked_mul(U256::from(BASIS_POINTS - discount_bps))
        .and_then(|v| v.checked_mul(scale))
        .ok_or(SaleError::PriceOverflow)?;
    Ok(numerator / U256::from(BASIS_POINTS * CENTS_PER_UNIT))
}

/// Total for `count` identifiers at `unit_price`.
pub fn compute_total(unit_price: U256, count: u64) -> Result<U256, SaleError> {
    unit_price
        .checked_mul(U256::from(count))
        .ok_or(SaleError::PriceOverflow)
}
