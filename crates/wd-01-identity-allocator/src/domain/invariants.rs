//! # Domain Invariants
//!
//! Business rules for identifier allocation.

use super::errors::{AllocatorError, InvalidTokenReason};
use super::value_objects::{split_token_id, Namespace, MAX_SEQUENCE};
use shared_types::TokenId;

/// Invariant: a batch of `count` identifiers starting at `next_sequence`
/// stays at or below the ceiling.
///
/// Checked for the whole batch before anything is allocated.
pub fn invariant_within_ceiling(
    namespace: &Namespace,
    next_sequence: u64,
    count: u64,
    max_token_id: TokenId,
) -> Result<(), AllocatorError> {
    let first = namespace.compose(next_sequence);
    let remaining = if first > max_token_id {
        0
    } else {
        (max_token_id.0 - first.0 + 1).min(u64::MAX as u128) as u64
    };
    if count > remaining {
        return Err(AllocatorError::SupplyOverflow {
            requested: count,
            remaining,
            max_token_id,
        });
    }
    Ok(())
}

/// Invariant: sequence floor lies inside the span and is non-zero.
pub fn invariant_sequence_in_span(first_sequence: u64) -> Result<(), AllocatorError> {
    if first_sequence == 0 || first_sequence > MAX_SEQUENCE {
        return Err(AllocatorError::InvalidFirstSequence(first_sequence));
    }
    Ok(())
}

/// Invariant: a foreign identifier carries the expected tag and an in-range
/// sequence.
pub fn invariant_namespace_match(
    token_id: TokenId,
    expected: &Namespace,
) -> Result<(), AllocatorError> {
    let (tag, sequence) = split_token_id(token_id);
    if tag != expected.domain_tag as u128 {
        return Err(AllocatorError::InvalidTokenId {
            token_id,
            reason: InvalidTokenReason::TagMismatch {
                expected: expected.domain_tag,
                actual: tag,
            },
        });
    }
    if sequence == 0 || sequence > expected.max_sequence {
        return Err(AllocatorError::InvalidTokenId {
            token_id,
            reason: InvalidTokenReason::SequenceOutOfRange {
                sequence,
                max_sequence: expected.max_sequence,
            },
        });
    }
    Ok(())
}
