//! In-Memory Stable Coin Ledger Adapter
//!
//! Implements `StableCoinLedger` with per-token balance and allowance books.
//! Cloning shares the underlying books.

use crate::domain::PaymentError;
use crate::ports::outbound::StableCoinLedger;
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct TokenBook {
    decimals: u8,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl TokenBook {
    fn debit(&mut self, from: &Address, amount: U256) -> Result<(), PaymentError> {
        let available = self.balances.get(from).copied().unwrap_or_default();
        if available < amount {
            return Err(PaymentError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.balances.insert(*from, available - amount);
        Ok(())
    }

    fn credit(&mut self, to: &Address, amount: U256) {
        let entry = self.balances.entry(*to).or_default();
        *entry = entry.saturating_add(amount);
    }
}

/// Shared in-memory payment ledger.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStableCoins {
    books: Arc<RwLock<HashMap<Address, TokenBook>>>,
}

impl InMemoryStableCoins {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token with its decimals.
    pub fn register(&self, token: Address, decimals: u8) {
        self.books.write().entry(token).or_default().decimals = decimals;
    }

    /// Credit `amount` to `to`.
    pub fn mint(&self, token: &Address, to: &Address, amount: U256) -> Result<(), PaymentError> {
        let mut books = self.books.write();
        let book = books
            .get_mut(token)
            .ok_or(PaymentError::UnknownToken(*token))?;
        book.credit(to, amount);
        Ok(())
    }

    /// Let `spender` move up to `amount` of `owner`'s balance.
    pub fn approve(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: U256,
    ) -> Result<(), PaymentError> {
        let mut books = self.books.write();
        let book = books
            .get_mut(token)
            .ok_or(PaymentError::UnknownToken(*token))?;
        book.allowances.insert((*owner, *spender), amount);
        Ok(())
    }
}

impl StableCoinLedger for InMemoryStableCoins {
    fn decimals(&self, token: &Address) -> Result<u8, PaymentError> {
        self.books
            .read()
            .get(token)
            .map(|book| book.decimals)
            .ok_or(PaymentError::UnknownToken(*token))
    }

    fn balance_of(&self, token: &Address, holder: &Address) -> U256 {
        self.books
            .read()
            .get(token)
            .and_then(|book| book.balances.get(holder).copied())
            .unwrap_or_default()
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> U256 {
        self.books
            .read()
            .get(token)
            .and_then(|book| book.allowances.get(&(*owner, *spender)).copied())
            .unwrap_or_default()
    }

    fn transfer_from(
        &self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PaymentError> {
        let mut books = self.books.write();
        let book = books
            .get_mut(token)
            .ok_or(PaymentError::UnknownToken(*token))?;

        let approved = book
            .allowances
            .get(&(*from, *spender))
            .copied()
            .unwrap_or_default();
        if approved < amount {
            return Err(PaymentError::InsufficientAllowance {
                required: amount,
                available: approved,
            });
        }

        book.debit(from, amount)?;
        book.credit(to, amount);
        if approved != U256::MAX {
            book.allowances.insert((*from, *spender), approved - amount);
        }
        debug!("[wd-02] transfer_from moved {} units", amount);
        Ok(())
    }

    fn transfer(
        &self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), PaymentError> {
        let mut books = self.books.write();
        let book = books
            .get_mut(token)
            .ok_or(PaymentError::UnknownToken(*token))?;
        book.debit(from, amount)?;
        book.credit(to, amount);
        Ok(())
    }
}
