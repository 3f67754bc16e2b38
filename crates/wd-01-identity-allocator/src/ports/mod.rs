//! # Ports Module
//!
//! Inbound API of the allocator.

pub mod inbound;

pub use inbound::*;
