//! # Domain Entities
//!
//! Signed authorization requests and the inputs of the protector operations.

use super::typed_data::{hash_request, typed_data_digest, DomainSeparator};
use serde::{Deserialize, Serialize};
use shared_crypto::{selector, RecoverableSignature};
use shared_types::{address_to_u256, Address, DomainId, Hash, Timestamp, TokenId, U256};

/// Function signature bound into protector updates.
pub const SET_PROTECTOR_SIGNATURE: &str = "setProtector(address,bool,uint256,uint256,bytes)";

/// Function signature bound into protected transfers.
pub const PROTECTED_TRANSFER_SIGNATURE: &str =
    "protectedTransfer(uint256,address,uint256,uint256,bytes)";

/// Kind of sensitive mutation a request authorizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionCode {
    /// Deactivate a protector.
    RemoveProtector = 0,
    /// Activate a protector.
    AddProtector = 1,
    /// Move a locked token.
    ProtectedTransfer = 2,
}

impl ActionCode {
    /// Numeric code as signed.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Selector of the operation this action belongs to.
    pub fn selector(self) -> [u8; 4] {
        match self {
            ActionCode::RemoveProtector | ActionCode::AddProtector => {
                selector(SET_PROTECTOR_SIGNATURE)
            }
            ActionCode::ProtectedTransfer => selector(PROTECTED_TRANSFER_SIGNATURE),
        }
    }
}

/// The structured content a guardian signs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest {
    /// Selector of the guarded operation.
    pub selector: [u8; 4],
    /// Account submitting the request (the token owner).
    pub requester: Address,
    /// Account the action is about (the protector being changed).
    pub actor: Address,
    /// Contract the request is bound to.
    pub target_contract: Address,
    /// Token the action applies to.
    pub token_id: TokenId,
    /// Action kind.
    pub action: ActionCode,
    /// Action-specific argument.
    pub extra1: U256,
    /// Action-specific argument.
    pub extra2: U256,
    /// First second the request is valid.
    pub valid_since: Timestamp,
    /// Last second the request is valid.
    pub valid_until: Timestamp,
    /// Domain the request is meant for.
    pub domain_id: DomainId,
    /// Account that signed the request.
    pub signer: Address,
}

impl SignedRequest {
    /// Hash of the request fields.
    pub fn struct_hash(&self) -> Hash {
        hash_request(self)
    }

    /// Digest the signer signs.
    pub fn digest(&self, domain: &DomainSeparator) -> Hash {
        typed_data_digest(&domain.hash(), &self.struct_hash())
    }
}

/// Who may sign a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authority {
    /// Only the named account (a first protector approving their own
    /// nomination).
    Nominee(Address),
    /// Any of the listed active protectors.
    AnyProtector(Vec<Address>),
}

impl Authority {
    /// Whether `signer` satisfies this authority class.
    pub fn permits(&self, signer: &Address) -> bool {
        match self {
            Authority::Nominee(nominee) => nominee == signer,
            Authority::AnyProtector(protectors) => protectors.contains(signer),
        }
    }
}

/// Input of `set_protector`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectorUpdate {
    /// Token whose guardian set changes.
    pub token_id: TokenId,
    /// Protector to (de)activate.
    pub protector: Address,
    /// Activate or deactivate.
    pub active: bool,
    /// Validity window start.
    pub valid_since: Timestamp,
    /// Validity window end.
    pub valid_until: Timestamp,
    /// Domain the signer targeted.
    pub domain_id: DomainId,
    /// Claimed signer.
    pub signer: Address,
    /// Signature over the request digest.
    pub signature: RecoverableSignature,
}

/// Input of `protected_transfer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedTransfer {
    /// Locked token to move.
    pub token_id: TokenId,
    /// New owner.
    pub to: Address,
    /// Validity window start.
    pub valid_since: Timestamp,
    /// Validity window end.
    pub valid_until: Timestamp,
    /// Domain the signer targeted.
    pub domain_id: DomainId,
    /// Claimed signer (an active protector).
    pub signer: Address,
    /// Signature over the request digest.
    pub signature: RecoverableSignature,
}

impl ProtectorUpdate {
    /// Action this update performs.
    pub fn action(&self) -> ActionCode {
        if self.active {
            ActionCode::AddProtector
        } else {
            ActionCode::RemoveProtector
        }
    }

    /// Request the signer must have signed, as submitted by `requester`
    /// against `target_contract`.
    pub fn to_request(&self, requester: Address, target_contract: Address) -> SignedRequest {
        let action = self.action();
        SignedRequest {
            selector: action.selector(),
            requester,
            actor: self.protector,
            target_contract,
            token_id: self.token_id,
            action,
            extra1: U256::zero(),
            extra2: U256::zero(),
            valid_since: self.valid_since,
            valid_until: self.valid_until,
            domain_id: self.domain_id,
            signer: self.signer,
        }
    }
}

impl ProtectedTransfer {
    /// Request the signer must have signed. The recipient travels in
    /// `extra1`.
    pub fn to_request(&self, requester: Address, target_contract: Address) -> SignedRequest {
        SignedRequest {
            selector: ActionCode::ProtectedTransfer.selector(),
            requester,
            actor: self.signer,
            target_contract,
            token_id: self.token_id,
            action: ActionCode::ProtectedTransfer,
            extra1: address_to_u256(&self.to),
            extra2: U256::zero(),
            valid_since: self.valid_since,
            valid_until: self.valid_until,
            domain_id: self.domain_id,
            signer: self.signer,
        }
    }
}
