//! # Domain Entities
//!
//! Price configuration shared by every sale.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// An accepted payment token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableCoin {
    /// Token contract address.
    pub token: Address,
    /// Decimals read from the token when it was accepted.
    pub decimals: u8,
}

/// Sale price configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceConfig {
    /// Base price in US cents.
    pub base_price_cents: u32,
    /// Discount in basis points, `[0, 10000)`.
    pub discount_bps: u32,
    /// Accepted tokens in the order they were accepted.
    pub stable_coins: Vec<StableCoin>,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_price_cents: 990,
            discount_bps: 0,
            stable_coins: Vec::new(),
        }
    }
}

impl PriceConfig {
    /// Look up an accepted token.
    pub fn stable_coin(&self, token: &Address) -> Option<&StableCoin> {
        self.stable_coins.iter().find(|coin| &coin.token == token)
    }

    /// Accept `token`, or refresh its decimals if already accepted.
    pub fn accept(&mut self, token: Address, decimals: u8) {
        match self.stable_coins.iter_mut().find(|coin| coin.token == token) {
            Some(existing) => existing.decimals = decimals,
            None => self.stable_coins.push(StableCoin { token, decimals }),
        }
    }

    /// Stop accepting `token`. Returns whether it was accepted.
    pub fn reject(&mut self, token: &Address) -> bool {
        let before = self.stable_coins.len();
        self.stable_coins.retain(|coin| &coin.token != token);
        before != self.stable_coins.len()
    }

    /// Accepted token addresses.
    pub fn accepted_tokens(&self) -> Vec<Address> {
        self.stable_coins.iter().map(|coin| coin.token).collect()
    }
}
