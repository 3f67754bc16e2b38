//! # WD-04 Bridge Relay
//!
//! Exactly-once application of relayed cross-domain ownership messages.
//!
//! **Subsystem ID:** 4  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Decode `(recipient, token id)` payloads
//! - Accept messages only from the trusted emitter of the claimed domain
//! - Apply each `(emitter, sequence)` pair at most once
//! - Reject identifiers outside the source domain's namespace
//! - Escrow tokens leaving this domain and publish the outbound message
//!
//! ## Inbound Checks
//!
//! | Order | Check | Error |
//! |-------|-------|-------|
//! | 1 | payload decodes | `MalformedPayload` |
//! | 2 | emitter trusted for domain | `UntrustedEmitter` |
//! | 3 | pair not applied | `MessageAlreadyApplied` |
//! | 4 | identifier valid for source | `InvalidTokenId`, `NotInTransitFrom` |
//! | 5 | record pair, mint or finalize | - |
//!
//! `UntrustedEmitter` and `MessageAlreadyApplied` are delivery noise
//! (`BridgeError::is_delivery_noise`), not faults.
//!
//! ## Module Structure
//!
//! ```text
//! wd-04-bridge-relay/
//! ├── domain/          # payload codec, trusted emitters, applied set, errors
//! ├── ports/           # BridgeApi, RelayOutbox
//! ├── adapters/        # InMemoryOutbox
//! └── service.rs       # BridgeRelay
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryOutbox;
pub use domain::{
    AppliedMessages, BridgeError, BridgeMessage, OutboundMessage, ReceiveOutcome,
    TransferPayload, TrustedEmitters, TrustedRelay, PAYLOAD_LEN,
};
pub use ports::{BridgeApi, RelayOutbox};
pub use service::BridgeRelay;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
