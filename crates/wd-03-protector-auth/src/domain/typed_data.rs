//! # Typed-Data Digest
//!
//! Domain-separated structured hashing:
//!
//! ```text
//! digest      = keccak256(0x19 0x01 || domainHash || structHash)
//! domainHash  = keccak256(DOMAIN_TYPEHASH || keccak(name) || keccak(version) || chainId || verifyingContract)
//! structHash  = keccak256(REQUEST_TYPEHASH || field_1 || ... || field_12)
//! ```
//!
//! Every field is encoded as one 32-byte word. Addresses are left-padded,
//! the `bytes4` selector is right-padded.

use super::entities::SignedRequest;
use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, Keccak256Hasher};
use shared_types::{address_to_word, u256_to_word, u64_to_word, Address, DomainId, Hash, U256};

/// Domain type string.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Request type string.
pub const REQUEST_TYPE: &str = "SignedRequest(bytes4 selector,address requester,address actor,address targetContract,uint256 tokenId,uint256 actionCode,uint256 extra1,uint256 extra2,uint256 validSince,uint256 validUntil,uint256 domainId,address signer)";

/// Name bound into the domain hash.
pub const DOMAIN_NAME: &str = "Warden";

/// Version bound into the domain hash.
pub const DOMAIN_VERSION: &str = "1";

/// Parameters separating one verifying domain from every other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSeparator {
    /// Protocol name.
    pub name: String,
    /// Protocol version.
    pub version: String,
    /// Verifying domain id.
    pub chain_id: DomainId,
    /// Contract requests are bound to.
    pub verifying_contract: Address,
}

impl DomainSeparator {
    /// Separator with the default name and version.
    pub fn new(chain_id: DomainId, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// Domain hash.
    pub fn hash(&self) -> Hash {
        let mut hasher = Keccak256Hasher::new();
        hasher
            .update(&keccak256(DOMAIN_TYPE.as_bytes()))
            .update(&keccak256(self.name.as_bytes()))
            .update(&keccak256(self.version.as_bytes()))
            .update(&u64_to_word(self.chain_id))
            .update(&address_to_word(&self.verifying_contract));
        hasher.finalize()
    }
}

fn selector_word(selector: &[u8; 4]) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[..4].copy_from_slice(selector);
    word
}

/// Struct hash of a request.
pub fn hash_request(request: &SignedRequest) -> Hash {
    let mut hasher = Keccak256Hasher::new();
    hasher
        .update(&keccak256(REQUEST_TYPE.as_bytes()))
        .update(&selector_word(&request.selector))
        .update(&address_to_word(&request.requester))
        .update(&address_to_word(&request.actor))
        .update(&address_to_word(&request.target_contract))
        .update(&request.token_id.to_word())
        .update(&u256_to_word(&U256::from(request.action.code())))
        .update(&u256_to_word(&request.extra1))
        .update(&u256_to_word(&request.extra2))
        .update(&u64_to_word(request.valid_since))
        .update(&u64_to_word(request.valid_until))
        .update(&u64_to_word(request.domain_id))
        .update(&address_to_word(&request.signer));
    hasher.finalize()
}

/// Final digest from a domain hash and a struct hash.
pub fn typed_data_digest(domain_hash: &Hash, struct_hash: &Hash) -> Hash {
    let mut hasher = Keccak256Hasher::new();
    hasher
        .update(&[0x19, 0x01])
        .update(domain_hash)
        .update(struct_hash);
    hasher.finalize()
}
