//! # Warden Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── warden_benchmarks.rs  # digest, recovery, payload codec, buy
//! └── src/integration/
//!     ├── fixtures.rs           # test domains, keys and funding helpers
//!     ├── sale_flows.rs         # buy, pricing admin, supply ceiling, proceeds
//!     ├── protector_flows.rs    # guardians, locking, signatures, replay
//!     └── bridge_flows.rs       # send/receive round trips, idempotency
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wd-tests
//!
//! # By flow
//! cargo test -p wd-tests integration::bridge_flows
//!
//! # Benchmarks
//! cargo bench -p wd-tests
//! ```
