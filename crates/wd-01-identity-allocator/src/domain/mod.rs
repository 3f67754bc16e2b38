//! # Domain Module
//!
//! Core domain types for identity allocation and ownership.

pub mod errors;
pub mod invariants;
pub mod ledger;
pub mod value_objects;

pub use errors::*;
pub use invariants::*;
pub use ledger::{Custody, TokenLedger, TokenRecord};
pub use value_objects::*;
