//! # Transfer Payload
//!
//! Wire format of a relayed ownership transfer: two 32-byte words,
//! `recipient (left-padded address) || token id (big-endian)`.

use super::errors::BridgeError;
use serde::{Deserialize, Serialize};
use shared_types::{address_from_word, address_to_word, Address, TokenId};

/// Encoded payload length.
pub const PAYLOAD_LEN: usize = 64;

/// Decoded relay payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    /// New owner on the receiving domain.
    pub recipient: Address,
    /// Token being moved.
    pub token_id: TokenId,
}

impl TransferPayload {
    /// Encode to the 64-byte wire format.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PAYLOAD_LEN);
        out.extend_from_slice(&address_to_word(&self.recipient));
        out.extend_from_slice(&self.token_id.to_word());
        out
    }

    /// Decode the 64-byte wire format.
    pub fn decode(bytes: &[u8]) -> Result<Self, BridgeError> {
        if bytes.len() != PAYLOAD_LEN {
            return Err(BridgeError::MalformedPayload(format!(
                "expected {} bytes, got {}",
                PAYLOAD_LEN,
                bytes.len()
            )));
        }
        let mut recipient_word = [0u8; 32];
        let mut token_word = [0u8; 32];
        recipient_word.copy_from_slice(&bytes[..32]);
        token_word.copy_from_slice(&bytes[32..]);

        let recipient = address_from_word(&recipient_word).ok_or_else(|| {
            BridgeError::MalformedPayload("recipient word has non-zero padding".into())
        })?;
        let token_id = TokenId::from_word(&token_word)
            .ok_or_else(|| BridgeError::MalformedPayload("token id exceeds 128 bits".into()))?;

        Ok(Self {
            recipient,
            token_id,
        })
    }
}
