// Path: crates/api/src/state/mod.rs
//! The read contract for a consistent, point-in-time view of public content.
//!
//! - `StateSnapshot`: a merged view of durable committed state and pending
//!   (unconfirmed) mutations, answering every query without further locking.
//! - `StateSnapshotProvider`: the single capability the gateway needs to obtain
//!   such a view. How durable storage and the pending pool are combined is
//!   entirely the provider's business.

use agora_types::app::{ContentHash, ContentItem, Identifier, ProfileEntry};
use agora_types::error::StateError;
use async_trait::async_trait;
use std::sync::Arc;

/// An immutable, internally consistent view of committed and pending content.
///
/// An item visible in the committed layer stays visible unless a pending
/// mutation in the same snapshot supersedes it.
pub trait StateSnapshot: Send + Sync {
    /// Resolves a content item by hash, with pending mutations applied.
    fn content_item(&self, hash: &ContentHash) -> Option<&ContentItem>;
    /// Resolves the profile of an account, with pending mutations applied.
    fn profile(&self, public_key: &Identifier) -> Option<&ProfileEntry>;
    /// True if the item was created or last edited by a mutation still in the pending pool.
    fn is_pending(&self, hash: &ContentHash) -> bool;
    /// The committed block height this view is anchored to.
    fn block_height(&self) -> u64;
}

/// Produces a fresh [`StateSnapshot`] per call.
///
/// Implementations are shared across requests and must be thread-safe. The
/// call may suspend the caller while the merge is constructed; it is the only
/// suspension point of a feed request.
#[async_trait]
pub trait StateSnapshotProvider: Send + Sync {
    /// Captures the current merged view.
    async fn current_view(&self) -> Result<Arc<dyn StateSnapshot>, StateError>;
}
