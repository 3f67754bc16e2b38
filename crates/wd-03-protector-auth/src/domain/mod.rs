//! # Domain Module
//!
//! Signed requests, the typed-data digest, guardian sets and the consumed
//! signature set.

pub mod consumed;
pub mod entities;
pub mod errors;
pub mod guardians;
pub mod invariants;
pub mod typed_data;
pub mod verifier;

pub use consumed::ConsumedSignatures;
pub use entities::*;
pub use errors::*;
pub use guardians::{GuardianRegistry, GuardianSet, LockTransition};
pub use invariants::*;
pub use typed_data::*;
pub use verifier::AuthorizationVerifier;
