// Path: crates/state/src/ledger.rs

//! The committed store, the pending pool, and the snapshot provider over both.

use crate::mutation::{MutationTarget, PendingMutation};
use crate::view::AugmentedView;
use agora_api::global::Published;
use agora_api::state::{StateSnapshot, StateSnapshotProvider};
use agora_types::app::{ContentHash, ContentItem, Identifier, ProfileEntry};
use agora_types::error::StateError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Durable, committed public content at a block height.
#[derive(Debug, Clone, Default)]
pub struct CommittedState {
    /// Committed posts by hash.
    pub posts: BTreeMap<ContentHash, ContentItem>,
    /// Committed profiles by account.
    pub profiles: BTreeMap<Identifier, ProfileEntry>,
    /// The height of the last committed block.
    pub block_height: u64,
}

impl MutationTarget for CommittedState {
    fn post(&self, hash: &ContentHash) -> Option<&ContentItem> {
        self.posts.get(hash)
    }

    fn put_post(&mut self, item: ContentItem) {
        self.posts.insert(item.hash, item);
    }

    fn put_profile(&mut self, key: Identifier, profile: ProfileEntry) {
        self.profiles.insert(key, profile);
    }
}

#[derive(Debug, Default)]
struct PoolInner {
    queue: Vec<PendingMutation>,
    closed: bool,
}

/// An in-memory ledger: a committed state plus an ordered pool of pending
/// mutations.
///
/// The pool lock is held while a view captures the committed value and
/// while a commit publishes a new one, so a view sees each mutation exactly
/// once: either committed or pending.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    committed: Published<CommittedState>,
    pool: Mutex<PoolInner>,
}

impl MemoryLedger {
    /// Creates a ledger starting from `genesis` with an empty pool.
    pub fn new(genesis: CommittedState) -> Self {
        Self {
            committed: Published::new(genesis),
            pool: Mutex::new(PoolInner::default()),
        }
    }

    /// The currently committed state.
    pub fn committed(&self) -> Arc<CommittedState> {
        self.committed.load()
    }

    /// Queues a mutation. Returns the new pool size.
    ///
    /// The mutation is replayed with the queue on top of the committed state
    /// first; one that cannot be applied is rejected and never enters the
    /// pool, so views and commits stay buildable.
    pub fn submit(&self, mutation: PendingMutation) -> Result<usize, StateError> {
        let mut pool = self.pool.lock();
        if pool.closed {
            return Err(StateError::Unavailable("pending pool is closed".into()));
        }
        pool.queue.push(mutation);
        if let Err(e) = AugmentedView::build(self.committed.load(), &pool.queue) {
            pool.queue.pop();
            tracing::debug!(target: "state", error = %e, "rejected pending mutation");
            return Err(e);
        }
        Ok(pool.queue.len())
    }

    /// Number of queued mutations.
    pub fn pending_len(&self) -> usize {
        self.pool.lock().queue.len()
    }

    /// Stops the pool; subsequent submissions and views fail.
    pub fn close(&self) {
        self.pool.lock().closed = true;
    }

    /// Commits every queued mutation as one block.
    ///
    /// On failure nothing is published and the pool is left untouched.
    /// Returns the new block height.
    pub fn commit_pending(&self) -> Result<u64, StateError> {
        let mut pool = self.pool.lock();
        let base = self.committed.load();
        let height = base.block_height + 1;
        let mut next = CommittedState::clone(&base);
        for mutation in &pool.queue {
            mutation.apply_to(&mut next, Some(height))?;
        }
        next.block_height = height;
        let committed = pool.queue.len();
        self.committed.publish(next);
        pool.queue.clear();
        tracing::debug!(target: "state", height, committed, "committed pending mutations");
        Ok(height)
    }

    /// Builds the merged view of committed and pending state.
    pub fn augmented_view(&self) -> Result<AugmentedView, StateError> {
        let (base, pending) = {
            let pool = self.pool.lock();
            if pool.closed {
                return Err(StateError::Unavailable("pending pool is closed".into()));
            }
            (self.committed.load(), pool.queue.clone())
        };
        AugmentedView::build(base, &pending).inspect_err(|e| {
            tracing::warn!(target: "state", error = %e, pending = pending.len(), "failed to merge pending state");
        })
    }
}

#[async_trait]
impl StateSnapshotProvider for MemoryLedger {
    async fn current_view(&self) -> Result<Arc<dyn StateSnapshot>, StateError> {
        let view = self.augmented_view()?;
        Ok(Arc::new(view))
    }
}
