//! # Domain Invariants
//!
//! Checks applied to a signed request, in the order the verifier runs them.

use super::entities::{Authority, SignedRequest};
use super::errors::AuthError;
use shared_types::{Address, DomainId, Timestamp};

/// Invariant: `valid_since <= now <= valid_until`.
pub fn invariant_validity_window(
    request: &SignedRequest,
    now: Timestamp,
) -> Result<(), AuthError> {
    if now > request.valid_until {
        return Err(AuthError::ExpiredSignature {
            valid_until: request.valid_until,
            now,
        });
    }
    if now < request.valid_since {
        return Err(AuthError::PrematureSignature {
            valid_since: request.valid_since,
            now,
        });
    }
    Ok(())
}

/// Invariant: the request names this domain.
pub fn invariant_domain_match(
    request: &SignedRequest,
    domain_id: DomainId,
) -> Result<(), AuthError> {
    if request.domain_id != domain_id {
        return Err(AuthError::WrongDomain {
            expected: domain_id,
            actual: request.domain_id,
        });
    }
    Ok(())
}

/// Invariant: the signer holds the required authority.
pub fn invariant_signer_authority(
    signer: &Address,
    authority: &Authority,
) -> Result<(), AuthError> {
    if !authority.permits(signer) {
        return Err(AuthError::Unauthorized(*signer));
    }
    Ok(())
}
