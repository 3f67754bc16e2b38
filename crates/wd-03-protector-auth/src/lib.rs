//! # WD-03 Protector Authorization
//!
//! Signed, time-boxed requests gating changes to a token's protectors.
//!
//! **Subsystem ID:** 3  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Hash requests into a domain-separated typed-data digest
//! - Recover the secp256k1 signer and check its authority for the action
//! - Consume each digest exactly once
//! - Maintain guardian sets and the locked flag they imply
//!
//! ## Security Features
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Validity window | `valid_since <= now <= valid_until`, inclusive |
//! | Domain binding | chain id and verifying contract in the domain hash, domain id in the struct |
//! | Low-S only | one accepted signature per digest |
//! | Consumed set | append-only, checked after every other rule |
//! | Preconditions first | owner and guardian checks run before consumption |
//!
//! ## Authority
//!
//! | Action | Signer |
//! |--------|--------|
//! | Add first protector | the nominee |
//! | Add further protector | an active protector |
//! | Remove protector | an active protector |
//! | Protected transfer | an active protector |
//!
//! ## Module Structure
//!
//! ```text
//! wd-03-protector-auth/
//! ├── domain/          # requests, typed data, verifier, guardians, errors
//! ├── ports/           # ProtectorApi
//! └── service.rs       # ProtectorService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    hash_request, invariant_domain_match, invariant_signer_authority, invariant_validity_window,
    typed_data_digest, ActionCode, AuthError, Authority, AuthorizationVerifier,
    ConsumedSignatures, DomainSeparator, GuardianRegistry, GuardianSet, LockTransition,
    ProtectedTransfer, ProtectorUpdate, SignedRequest, DOMAIN_NAME, DOMAIN_TYPE, DOMAIN_VERSION,
    PROTECTED_TRANSFER_SIGNATURE, REQUEST_TYPE, SET_PROTECTOR_SIGNATURE,
};
pub use ports::ProtectorApi;
pub use service::ProtectorService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
