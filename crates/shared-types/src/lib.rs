//! # Shared Types Crate
//!
//! Primitive identifiers, domain events and the time source used by every
//! Warden subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Types that cross subsystem boundaries live here.
//! - **Fixed-Width Encodings**: Addresses and identifiers have one canonical
//!   32-byte word encoding, used by both the signature digest and the relay
//!   payload codec.
//! - **Injected Time**: No subsystem reads the wall clock directly; the
//!   runtime passes `now` from a `TimeSource`.

pub mod entities;
pub mod errors;
pub mod events;
pub mod hex_serde;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use events::{DomainEvent, EventLog};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, Timestamp};
