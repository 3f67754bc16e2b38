//! # Inbound Ports
//!
//! API trait defining what the Identity Allocator can do.

use crate::domain::{AllocatorError, Namespace};
use shared_types::TokenId;

/// Identity allocation API - inbound port.
pub trait IdentityAllocatorApi {
    /// Allocate one identifier.
    fn allocate_next(&mut self) -> Result<TokenId, AllocatorError>;

    /// Allocate `count` consecutive identifiers, all or nothing.
    fn allocate_batch(&mut self, count: u64) -> Result<Vec<TokenId>, AllocatorError>;

    /// Check that `token_id` belongs to `expected`.
    fn validate_foreign(&self, token_id: TokenId, expected: &Namespace)
        -> Result<(), AllocatorError>;

    /// Whether `token_id` lies in this domain's own namespace.
    fn is_local(&self, token_id: TokenId) -> bool;

    /// Identifier the next allocation would return.
    fn next_token_id(&self) -> TokenId;

    /// Current supply ceiling.
    fn max_token_id(&self) -> TokenId;

    /// Change the supply ceiling. Zero pins it to the last allocated id.
    fn set_max_token_id(&mut self, value: TokenId) -> Result<TokenId, AllocatorError>;
}
