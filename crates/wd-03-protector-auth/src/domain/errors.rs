//! # Domain Errors
//!
//! Error types for signed-request verification and guardian mutations.

use shared_types::{format_address, Address, DomainId, Timestamp, TokenId};
use thiserror::Error;
use wd_01_identity_allocator::LedgerError;

/// Authorization errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// `now` is past the end of the validity window.
    #[error("Expired signature: valid until {valid_until}, now {now}")]
    ExpiredSignature {
        /// Window end.
        valid_until: Timestamp,
        /// Verification time.
        now: Timestamp,
    },

    /// `now` is before the start of the validity window.
    #[error("Premature signature: valid since {valid_since}, now {now}")]
    PrematureSignature {
        /// Window start.
        valid_since: Timestamp,
        /// Verification time.
        now: Timestamp,
    },

    /// Request targets another domain.
    #[error("Wrong domain: expected {expected}, got {actual}")]
    WrongDomain {
        /// This domain.
        expected: DomainId,
        /// Domain named in the request.
        actual: DomainId,
    },

    /// Recovery failed or recovered a different account than claimed.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Signer lacks the authority the action requires.
    #[error("Unauthorized signer: {}", format_address(.0))]
    Unauthorized(Address),

    /// Digest already consumed.
    #[error("Signature already used")]
    SignatureReplayed,

    /// Requester does not own the token.
    #[error("Not owner of token {token_id}: {}", format_address(.caller))]
    NotTokenOwner {
        /// Token in question.
        token_id: TokenId,
        /// Requester.
        caller: Address,
    },

    /// Protector is the zero address or the owner.
    #[error("Invalid protector: {}", format_address(.0))]
    InvalidProtector(Address),

    /// Protector already active for the token.
    #[error("Protector already active: {}", format_address(.0))]
    ProtectorAlreadyActive(Address),

    /// Protector not active for the token.
    #[error("Protector not found: {}", format_address(.0))]
    ProtectorNotFound(Address),

    /// Protected transfer of a token that has no protector.
    #[error("Token {0} is not locked")]
    NotLocked(TokenId),

    /// Ownership ledger rejected the operation.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl AuthError {
    /// Whether the error came from the signature checks themselves (as
    /// opposed to a precondition on the token or guardian set).
    pub fn is_signature_failure(&self) -> bool {
        matches!(
            self,
            AuthError::ExpiredSignature { .. }
                | AuthError::PrematureSignature { .. }
                | AuthError::WrongDomain { .. }
                | AuthError::InvalidSignature(_)
                | AuthError::Unauthorized(_)
                | AuthError::SignatureReplayed
        )
    }
}
