//! # WD-02 Sale Engine
//!
//! Stable-coin priced sale of identifiers with atomic payment collection.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Price one identifier as `cents * (10000 - bps) / 10000`, rescaled to the
//!   payment token's decimals in 256-bit arithmetic
//! - Collect `price * count` from the buyer, then allocate and mint
//! - Admin configuration: price, discount, accepted tokens, supply ceiling
//!   and proceeds withdrawal
//!
//! ## Atomicity
//!
//! | Step | Failure | State touched |
//! |------|---------|---------------|
//! | count, token, overflow | `InvalidCount`, `UnknownStableCoin`, `PriceOverflow` | none |
//! | capacity, id collision | `SupplyOverflow`, `TokenAlreadyExists` | none |
//! | payment | `InsufficientAllowance`, `InsufficientBalance` | none |
//! | allocate + mint | cannot fail after the checks above | counter, ledger |
//!
//! ## Module Structure
//!
//! ```text
//! wd-02-sale-engine/
//! ├── domain/          # PriceConfig, pricing math, invariants, errors
//! ├── ports/           # SaleApi, StableCoinLedger
//! ├── adapters/        # InMemoryStableCoins
//! └── service.rs       # SaleEngine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryStableCoins;
pub use domain::{
    compute_final_price, compute_total, invariant_discount_range, invariant_positive_count,
    invariant_supported_decimals, PaymentError, PriceConfig, SaleError, StableCoin,
    BASIS_POINTS, MAX_DECIMALS,
};
pub use ports::{SaleApi, StableCoinLedger};
pub use service::SaleEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
