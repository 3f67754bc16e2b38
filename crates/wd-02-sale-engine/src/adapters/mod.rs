//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound payment port.

mod stable_coins;

pub use stable_coins::InMemoryStableCoins;
