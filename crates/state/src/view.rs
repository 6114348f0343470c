// Path: crates/state/src/view.rs

//! A copy-on-write overlay of pending mutations on top of committed state.

use crate::ledger::CommittedState;
use crate::mutation::{MutationTarget, PendingMutation};
use agora_api::state::StateSnapshot;
use agora_types::app::{ContentHash, ContentItem, Identifier, ProfileEntry};
use agora_types::error::StateError;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// An immutable merge of a committed state and the pending pool.
///
/// Reads check the overlay first and fall through to the committed base.
/// Nothing is written to the base.
#[derive(Debug, Clone)]
pub struct AugmentedView {
    base: Arc<CommittedState>,
    posts: BTreeMap<ContentHash, ContentItem>,
    profiles: BTreeMap<Identifier, ProfileEntry>,
    pending_posts: BTreeSet<ContentHash>,
}

impl AugmentedView {
    /// Replays `pending` in pool order on top of `base`.
    ///
    /// Fails if any mutation cannot be applied; a partially merged view is
    /// never returned.
    pub fn build(
        base: Arc<CommittedState>,
        pending: &[PendingMutation],
    ) -> Result<Self, StateError> {
        let mut view = Self {
            base,
            posts: BTreeMap::new(),
            profiles: BTreeMap::new(),
            pending_posts: BTreeSet::new(),
        };
        for mutation in pending {
            mutation.apply_to(&mut view, None)?;
            if let PendingMutation::PutPost(item) = mutation {
                view.pending_posts.insert(item.hash);
            }
        }
        Ok(view)
    }

    /// Number of posts touched by the overlay.
    pub fn overlay_len(&self) -> usize {
        self.posts.len()
    }
}

impl MutationTarget for AugmentedView {
    fn post(&self, hash: &ContentHash) -> Option<&ContentItem> {
        self.posts.get(hash).or_else(|| self.base.posts.get(hash))
    }

    fn put_post(&mut self, item: ContentItem) {
        self.posts.insert(item.hash, item);
    }

    fn put_profile(&mut self, key: Identifier, profile: ProfileEntry) {
        self.profiles.insert(key, profile);
    }
}

impl StateSnapshot for AugmentedView {
    fn content_item(&self, hash: &ContentHash) -> Option<&ContentItem> {
        MutationTarget::post(self, hash)
    }

    fn profile(&self, public_key: &Identifier) -> Option<&ProfileEntry> {
        self.profiles
            .get(public_key)
            .or_else(|| self.base.profiles.get(public_key))
    }

    fn is_pending(&self, hash: &ContentHash) -> bool {
        self.pending_posts.contains(hash)
    }

    fn block_height(&self) -> u64 {
        self.base.block_height
    }
}
