//! # Authorization Verifier
//!
//! Verification and consumption of a signed request as one step:
//!
//! 1. Recompute the typed-data digest
//! 2. Validity window (`ExpiredSignature`, `PrematureSignature`)
//! 3. Domain id (`WrongDomain`)
//! 4. Signer recovery (`InvalidSignature`)
//! 5. Signer authority (`Unauthorized`)
//! 6. Replay (`SignatureReplayed`)
//! 7. Consume the digest
//!
//! Nothing is written before step 7, so a rejected request leaves no trace.

use super::consumed::ConsumedSignatures;
use super::entities::{Authority, SignedRequest};
use super::errors::AuthError;
use super::invariants::{
    invariant_domain_match, invariant_signer_authority, invariant_validity_window,
};
use super::typed_data::{typed_data_digest, DomainSeparator};
use shared_crypto::{recover_address, RecoverableSignature};
use shared_types::{format_address, Address, DomainId, Hash, Timestamp};
use tracing::{debug, warn};

/// Verifies signed requests for one domain.
#[derive(Debug)]
pub struct AuthorizationVerifier {
    domain: DomainSeparator,
    domain_hash: Hash,
    consumed: ConsumedSignatures,
}

impl AuthorizationVerifier {
    /// Create a verifier bound to `domain`.
    pub fn new(domain: DomainSeparator) -> Self {
        let domain_hash = domain.hash();
        Self {
            domain,
            domain_hash,
            consumed: ConsumedSignatures::new(),
        }
    }

    /// Domain parameters.
    pub fn domain(&self) -> &DomainSeparator {
        &self.domain
    }

    /// Verifying domain id.
    pub fn domain_id(&self) -> DomainId {
        self.domain.chain_id
    }

    /// Contract requests must be bound to.
    pub fn verifying_contract(&self) -> Address {
        self.domain.verifying_contract
    }

    /// Digests consumed so far.
    pub fn consumed(&self) -> &ConsumedSignatures {
        &self.consumed
    }

    /// Digest of `request` under this domain.
    pub fn digest(&self, request: &SignedRequest) -> Hash {
        typed_data_digest(&self.domain_hash, &request.struct_hash())
    }

    /// Verify `request` and consume its digest. Returns the signer.
    pub fn verify_and_consume(
        &mut self,
        request: &SignedRequest,
        signature: &RecoverableSignature,
        now: Timestamp,
        authority: &Authority,
    ) -> Result<Address, AuthError> {
        let digest = self.digest(request);

        invariant_validity_window(request, now)?;
        invariant_domain_match(request, self.domain.chain_id)?;

        let recovered = recover_address(&digest, signature).map_err(|e| {
            warn!("[wd-03] Signature recovery failed: {}", e);
            AuthError::InvalidSignature(e.to_string())
        })?;
        if recovered != request.signer {
            warn!(
                "[wd-03] Signer mismatch: claimed {}, recovered {}",
                format_address(&request.signer),
                format_address(&recovered)
            );
            return Err(AuthError::InvalidSignature(format!(
                "recovered {} instead of {}",
                format_address(&recovered),
                format_address(&request.signer)
            )));
        }

        invariant_signer_authority(&request.signer, authority)?;

        if !self.consumed.consume(digest) {
            debug!("[wd-03] Replay of digest 0x{}", hex_prefix(&digest));
            return Err(AuthError::SignatureReplayed);
        }

        debug!(
            "[wd-03] Consumed digest 0x{} signed by {}",
            hex_prefix(&digest),
            format_address(&recovered)
        );
        Ok(recovered)
    }
}

fn hex_prefix(digest: &Hash) -> String {
    hex::encode(&digest[..4])
}
