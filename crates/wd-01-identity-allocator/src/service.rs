//! # Identity Allocator Service
//!
//! Owns the per-domain sequence counter. The counter only moves on a
//! successful allocation, so callers that need payment first must collect it
//! before calling `allocate_batch` (see `ensure_capacity` / `peek_batch`).

use crate::domain::{
    invariant_namespace_match, invariant_sequence_in_span, invariant_within_ceiling,
    AllocatorError, Namespace,
};
use crate::ports::IdentityAllocatorApi;
use serde::{Deserialize, Serialize};
use shared_types::TokenId;
use tracing::{debug, info};

/// Allocator construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Tag of this domain.
    pub domain_tag: u64,
    /// First sequence handed out.
    pub first_sequence: u64,
    /// Supply ceiling; defaults to the last id of the namespace.
    pub max_token_id: Option<TokenId>,
}

impl AllocatorConfig {
    /// Full-span config for `domain_tag`.
    pub fn for_tag(domain_tag: u64) -> Self {
        Self {
            domain_tag,
            ..Self::default()
        }
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            domain_tag: 0,
            first_sequence: 1,
            max_token_id: None,
        }
    }
}

/// Per-domain identifier allocator.
#[derive(Debug)]
pub struct IdentityAllocator {
    namespace: Namespace,
    next_sequence: u64,
    max_token_id: TokenId,
}

impl IdentityAllocator {
    /// Create an allocator.
    pub fn new(config: AllocatorConfig) -> Result<Self, AllocatorError> {
        invariant_sequence_in_span(config.first_sequence)?;
        let namespace = Namespace::new(config.domain_tag);
        let floor = namespace.compose(config.first_sequence - 1);
        let ceiling = namespace.last_token_id();

        let max_token_id = match config.max_token_id {
            None => ceiling,
            Some(requested) if requested >= floor && requested <= ceiling => requested,
            Some(requested) => {
                return Err(AllocatorError::InvalidMaxTokenId {
                    requested,
                    min: floor,
                    max: ceiling,
                })
            }
        };

        info!(
            "[wd-01] Allocator ready: tag {}, first id {}, max id {}",
            config.domain_tag,
            namespace.compose(config.first_sequence),
            max_token_id
        );

        Ok(Self {
            namespace,
            next_sequence: config.first_sequence,
            max_token_id,
        })
    }

    /// This domain's namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Last identifier handed out, or the id just below the first one if
    /// nothing has been allocated yet.
    pub fn last_allocated(&self) -> TokenId {
        self.namespace.compose(self.next_sequence - 1)
    }

    /// Fail with `SupplyOverflow` unless `count` more identifiers fit.
    pub fn ensure_capacity(&self, count: u64) -> Result<(), AllocatorError> {
        if count == 0 {
            return Err(AllocatorError::ZeroCount);
        }
        invariant_within_ceiling(&self.namespace, self.next_sequence, count, self.max_token_id)
    }

    /// Identifiers the next `allocate_batch(count)` would return, without
    /// moving the counter.
    pub fn peek_batch(&self, count: u64) -> Result<Vec<TokenId>, AllocatorError> {
        self.ensure_capacity(count)?;
        Ok((0..count)
            .map(|offset| self.namespace.compose(self.next_sequence + offset))
            .collect())
    }
}

impl IdentityAllocatorApi for IdentityAllocator {
    fn allocate_next(&mut self) -> Result<TokenId, AllocatorError> {
        let mut ids = self.allocate_batch(1)?;
        ids.pop().ok_or(AllocatorError::ZeroCount)
    }

    fn allocate_batch(&mut self, count: u64) -> Result<Vec<TokenId>, AllocatorError> {
        let ids = self.peek_batch(count)?;
        self.next_sequence += count;
        debug!(
            "[wd-01] Allocated {} id(s), next sequence {}",
            count, self.next_sequence
        );
        Ok(ids)
    }

    fn validate_foreign(
        &self,
        token_id: TokenId,
        expected: &Namespace,
    ) -> Result<(), AllocatorError> {
        invariant_namespace_match(token_id, expected)
    }

    fn is_local(&self, token_id: TokenId) -> bool {
        self.namespace.contains(token_id)
    }

    fn next_token_id(&self) -> TokenId {
        self.namespace.compose(self.next_sequence)
    }

    fn max_token_id(&self) -> TokenId {
        self.max_token_id
    }

    fn set_max_token_id(&mut self, value: TokenId) -> Result<TokenId, AllocatorError> {
        let floor = self.last_allocated();
        let ceiling = self.namespace.last_token_id();
        let resolved = if value.0 == 0 { floor } else { value };

        if resolved < floor || resolved > ceiling {
            return Err(AllocatorError::InvalidMaxTokenId {
                requested: value,
                min: floor,
                max: ceiling,
            });
        }

        self.max_token_id = resolved;
        info!("[wd-01] Max token id set to {}", resolved);
        Ok(resolved)
    }
}
