//! # Guardian Registry
//!
//! Active protectors per token. A token with at least one active protector
//! is locked.

use shared_types::{Address, TokenId};
use std::collections::HashMap;

/// Active protectors of one token, in activation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuardianSet {
    active: Vec<Address>,
}

impl GuardianSet {
    /// Whether `protector` is active.
    pub fn is_active(&self, protector: &Address) -> bool {
        self.active.contains(protector)
    }

    /// Active protectors.
    pub fn active(&self) -> &[Address] {
        &self.active
    }

    /// Whether no protector is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn activate(&mut self, protector: Address) -> bool {
        if self.is_active(&protector) {
            return false;
        }
        self.active.push(protector);
        true
    }

    fn deactivate(&mut self, protector: &Address) -> bool {
        let before = self.active.len();
        self.active.retain(|p| p != protector);
        before != self.active.len()
    }
}

/// Lock flag transition caused by a guardian mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTransition {
    /// First protector added.
    Locked,
    /// Last protector removed.
    Unlocked,
    /// Lock state unchanged.
    Unchanged,
}

/// Guardian sets of every token.
#[derive(Debug, Default)]
pub struct GuardianRegistry {
    sets: HashMap<TokenId, GuardianSet>,
}

impl GuardianRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active protectors of `token_id` (empty if none).
    pub fn protectors_of(&self, token_id: TokenId) -> Vec<Address> {
        self.sets
            .get(&token_id)
            .map(|set| set.active().to_vec())
            .unwrap_or_default()
    }

    /// Whether `protector` is active for `token_id`.
    pub fn is_active(&self, token_id: TokenId, protector: &Address) -> bool {
        self.sets
            .get(&token_id)
            .is_some_and(|set| set.is_active(protector))
    }

    /// Whether `token_id` has any active protector.
    pub fn has_protectors(&self, token_id: TokenId) -> bool {
        self.sets.get(&token_id).is_some_and(|set| !set.is_empty())
    }

    /// Activate `protector`. Returns `None` if already active.
    pub fn activate(&mut self, token_id: TokenId, protector: Address) -> Option<LockTransition> {
        let set = self.sets.entry(token_id).or_default();
        let was_empty = set.is_empty();
        if !set.activate(protector) {
            return None;
        }
        Some(if was_empty {
            LockTransition::Locked
        } else {
            LockTransition::Unchanged
        })
    }

    /// Deactivate `protector`. Returns `None` if it was not active.
    pub fn deactivate(&mut self, token_id: TokenId, protector: &Address) -> Option<LockTransition> {
        let set = self.sets.get_mut(&token_id)?;
        if !set.deactivate(protector) {
            return None;
        }
        if set.is_empty() {
            self.sets.remove(&token_id);
            Some(LockTransition::Unlocked)
        } else {
            Some(LockTransition::Unchanged)
        }
    }

    /// Drop every protector of `token_id`, returning the removed ones.
    pub fn reset(&mut self, token_id: TokenId) -> Vec<Address> {
        self.sets
            .remove(&token_id)
            .map(|set| set.active)
            .unwrap_or_default()
    }
}
