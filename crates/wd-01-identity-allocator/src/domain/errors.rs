//! # Domain Errors
//!
//! Error types for identity allocation and the ownership ledger.

use shared_types::{Address, DomainId, TokenId};
use thiserror::Error;

/// Why a foreign identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// Encoded tag differs from the tag accepted for the source domain.
    TagMismatch {
        /// Tag accepted for the claimed source.
        expected: u64,
        /// Tag encoded in the identifier.
        actual: u128,
    },
    /// Sequence is zero or above the namespace ceiling.
    SequenceOutOfRange {
        /// Encoded sequence.
        sequence: u64,
        /// Highest accepted sequence.
        max_sequence: u64,
    },
}

/// Allocation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocatorError {
    /// Allocation would pass the supply ceiling.
    #[error("Supply overflow: requested {requested}, {remaining} left below max token id {max_token_id}")]
    SupplyOverflow {
        /// Identifiers requested.
        requested: u64,
        /// Identifiers still available.
        remaining: u64,
        /// Configured ceiling.
        max_token_id: TokenId,
    },

    /// Identifier does not belong to the namespace it claims.
    #[error("Invalid token id {token_id}: {reason:?}")]
    InvalidTokenId {
        /// Rejected identifier.
        token_id: TokenId,
        /// Rejection detail.
        reason: InvalidTokenReason,
    },

    /// Ceiling below what has already been allocated, or outside the span.
    #[error("Invalid max token id {requested}: must lie in [{min}, {max}]")]
    InvalidMaxTokenId {
        /// Requested ceiling.
        requested: TokenId,
        /// Lowest acceptable ceiling.
        min: TokenId,
        /// Highest acceptable ceiling.
        max: TokenId,
    },

    /// Sequence floor outside `[1, SEQUENCE_SPAN)`.
    #[error("Invalid first sequence: {0}")]
    InvalidFirstSequence(u64),

    /// Zero identifiers requested.
    #[error("Allocation count must be at least 1")]
    ZeroCount,
}

/// Ownership ledger errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Token unknown on this domain.
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),

    /// Token already exists (double mint).
    #[error("Token already exists: {0}")]
    TokenAlreadyExists(TokenId),

    /// Caller does not own the token.
    #[error("Not owner of token {token_id}")]
    NotOwner {
        /// Token in question.
        token_id: TokenId,
        /// Offending caller.
        caller: Address,
    },

    /// Token has an active protector; plain transfers are disabled.
    #[error("Token {0} is locked")]
    TokenLocked(TokenId),

    /// Token has left for another domain and has no local owner.
    #[error("Token {token_id} is in transit to domain {target_domain}")]
    InTransit {
        /// Token in question.
        token_id: TokenId,
        /// Destination domain.
        target_domain: DomainId,
    },

    /// Token is held locally, not awaiting a cross-domain return.
    #[error("Token {0} is not in transit")]
    NotInTransit(TokenId),

    /// Transfers to the zero address are not allowed.
    #[error("Zero address recipient")]
    ZeroAddress,
}
