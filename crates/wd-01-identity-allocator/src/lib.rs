//! # WD-01 Identity Allocator
//!
//! Globally unique token identifiers without cross-domain coordination.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Embed the domain tag in the high-order digits of every identifier and a
//!   per-domain sequence in the low-order digits
//! - Reject allocation past the configured ceiling
//! - Validate identifiers claimed by relayed messages against the namespace
//!   of their source domain
//! - Keep the ownership index (`TokenLedger`) the other subsystems mutate
//!
//! ## Operational Precondition
//!
//! Domain tags are trusted configuration. Uniqueness across domains holds only
//! if every domain is given its own tag out-of-band.
//!
//! ## Module Structure
//!
//! ```text
//! wd-01-identity-allocator/
//! ├── domain/          # Namespace math, ledger, invariants, errors
//! ├── ports/           # IdentityAllocatorApi
//! └── service.rs       # IdentityAllocator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    invariant_namespace_match, invariant_sequence_in_span, invariant_within_ceiling,
    split_token_id, AllocatorError, Custody, InvalidTokenReason, LedgerError, Namespace,
    TokenLedger, TokenRecord, MAX_SEQUENCE, SEQUENCE_SPAN,
};
pub use ports::IdentityAllocatorApi;
pub use service::{AllocatorConfig, IdentityAllocator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
