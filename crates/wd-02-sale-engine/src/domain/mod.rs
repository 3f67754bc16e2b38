//! # Domain Module
//!
//! Core domain types for the sale: price configuration, pricing math and
//! errors.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod pricing;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use pricing::*;
