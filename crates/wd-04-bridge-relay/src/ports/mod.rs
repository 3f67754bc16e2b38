//! # Ports Module
//!
//! Hexagonal architecture ports (inbound API, outbound relay).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
