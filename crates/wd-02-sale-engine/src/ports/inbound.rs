//! # Inbound Ports
//!
//! API trait defining what the Sale Engine can do.

use crate::domain::{SaleError, StableCoin};
use shared_types::{Address, EventLog, TokenId, U256};
use wd_01_identity_allocator::TokenLedger;

/// Sale API - inbound port.
pub trait SaleApi {
    /// Price of one identifier in `token`'s smallest unit.
    fn final_price(&self, token: &Address) -> Result<U256, SaleError>;

    /// Collect payment from `buyer` and mint `count` identifiers to them.
    fn buy(
        &mut self,
        ledger: &mut TokenLedger,
        buyer: Address,
        token: Address,
        count: u64,
        events: &mut EventLog,
    ) -> Result<Vec<TokenId>, SaleError>;

    /// Set the base price in cents (admin).
    fn set_price(
        &mut self,
        caller: Address,
        cents: u32,
        events: &mut EventLog,
    ) -> Result<(), SaleError>;

    /// Set the discount in basis points (admin).
    fn set_discount(
        &mut self,
        caller: Address,
        basis_points: u32,
        events: &mut EventLog,
    ) -> Result<(), SaleError>;

    /// Accept or stop accepting a payment token (admin).
    fn set_stable_coin(
        &mut self,
        caller: Address,
        token: Address,
        active: bool,
        events: &mut EventLog,
    ) -> Result<(), SaleError>;

    /// Accepted payment tokens in acceptance order.
    fn stable_coins(&self) -> Vec<StableCoin>;

    /// Change the supply ceiling (admin). Zero pins it to the last id sold.
    fn set_max_token_id(
        &mut self,
        caller: Address,
        value: TokenId,
        events: &mut EventLog,
    ) -> Result<TokenId, SaleError>;

    /// Move collected proceeds to `beneficiary` (admin). Zero moves
    /// everything.
    fn withdraw_proceeds(
        &mut self,
        caller: Address,
        beneficiary: Address,
        token: Address,
        amount: U256,
        events: &mut EventLog,
    ) -> Result<U256, SaleError>;
}
