//! # Warden Runtime Library
//!
//! Wires the subsystems of one domain and exposes them through a
//! single-writer facade. The `warden-node` binary in `main.rs` is a thin
//! shell around this library.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: subsystems expose inbound API traits and
//!   depend on outbound ports; this crate picks the adapters
//! - **Injected State**: the ledger and event log are owned here and lent to
//!   each subsystem call
//! - **Single Writer**: one mutex per domain, held for the whole call
//!
//! ## Module Structure
//!
//! ```text
//! warden-runtime/
//! ├── config.rs     # DomainConfig, load_config, ConfigError
//! ├── container.rs  # DomainState, DomainRuntime facade
//! ├── errors.rs     # RuntimeError
//! ├── ingest.rs     # JSON-lines relay ingestion
//! └── main.rs       # warden-node binary
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod container;
pub mod errors;
pub mod ingest;

pub use config::{
    load_config, load_config_with, ConfigError, DomainConfig, StableCoinConfig,
    TrustedEmitterConfig, CONFIG_VERSION,
};
pub use container::{DomainRuntime, DomainState};
pub use errors::RuntimeError;
pub use ingest::{run_ingest, IngestSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
