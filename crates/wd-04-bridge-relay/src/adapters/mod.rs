//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound relay port.

mod outbox;

pub use outbox::InMemoryOutbox;
