//! # Domain Module
//!
//! Relay payloads, trusted emitters and the applied-message set.

pub mod applied;
pub mod entities;
pub mod errors;
pub mod payload;
pub mod trusted;

pub use applied::AppliedMessages;
pub use entities::*;
pub use errors::*;
pub use payload::{TransferPayload, PAYLOAD_LEN};
pub use trusted::TrustedEmitters;
