//! # Runtime Errors
//!
//! Every subsystem error a facade call can surface.

use thiserror::Error;
use wd_01_identity_allocator::{AllocatorError, LedgerError};
use wd_02_sale_engine::SaleError;
use wd_03_protector_auth::AuthError;
use wd_04_bridge_relay::BridgeError;

use crate::config::ConfigError;

/// Errors returned by `DomainRuntime`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration rejected at startup.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Identifier allocation failed.
    #[error(transparent)]
    Allocator(#[from] AllocatorError),

    /// Ownership change refused.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Sale or admin call refused.
    #[error(transparent)]
    Sale(#[from] SaleError),

    /// Signed request refused.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Relay message refused.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl RuntimeError {
    /// Duplicate or untrusted relay deliveries.
    pub fn is_delivery_noise(&self) -> bool {
        matches!(self, RuntimeError::Bridge(e) if e.is_delivery_noise())
    }
}
