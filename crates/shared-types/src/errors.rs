//! # Error Types
//!
//! Errors shared by more than one subsystem.

use thiserror::Error;

/// Errors raised while parsing textual encodings (config files, relay input).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded input had the wrong byte length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
