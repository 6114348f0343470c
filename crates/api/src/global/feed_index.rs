// Path: crates/api/src/global/feed_index.rs

//! The whitelist of content eligible for the global feed, in walk order.

use agora_types::app::ContentHash;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound::{Excluded, Unbounded};

type WalkKey = (Reverse<u64>, ContentHash);

/// The whitelist, ordered newest-first by `(timestamp, hash)`.
///
/// The order is a stable total order: two entries with the same timestamp are
/// ordered by hash, so a walk is fully deterministic for a given index value.
#[derive(Debug, Clone, Default)]
pub struct FeedIndex {
    order: BTreeSet<WalkKey>,
    timestamps: HashMap<ContentHash, u64>,
}

impl FeedIndex {
    /// Creates an empty whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitelists `hash` at `timestamp_nanos`. Returns false if it was already
    /// present at that timestamp; an entry at a different timestamp is moved.
    pub fn insert(&mut self, hash: ContentHash, timestamp_nanos: u64) -> bool {
        match self.timestamps.insert(hash, timestamp_nanos) {
            Some(old) if old == timestamp_nanos => false,
            Some(old) => {
                self.order.remove(&(Reverse(old), hash));
                self.order.insert((Reverse(timestamp_nanos), hash));
                true
            }
            None => {
                self.order.insert((Reverse(timestamp_nanos), hash));
                true
            }
        }
    }

    /// Removes `hash` from the whitelist. Returns true if it was present.
    pub fn remove(&mut self, hash: &ContentHash) -> bool {
        match self.timestamps.remove(hash) {
            Some(ts) => self.order.remove(&(Reverse(ts), *hash)),
            None => false,
        }
    }

    /// True if `hash` is whitelisted.
    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.timestamps.contains_key(hash)
    }

    /// Number of whitelisted entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is whitelisted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Walks the whitelist in feed order, starting strictly after `cursor`.
    ///
    /// A cursor that is absent from the index walks from the start.
    pub fn walk_after<'a>(
        &'a self,
        cursor: Option<&ContentHash>,
    ) -> Box<dyn Iterator<Item = &'a ContentHash> + 'a> {
        let start = cursor.and_then(|c| self.timestamps.get(c).map(|ts| (Reverse(*ts), *c)));
        match start {
            Some(key) => Box::new(self.order.range((Excluded(key), Unbounded)).map(|(_, h)| h)),
            None => Box::new(self.order.iter().map(|(_, h)| h)),
        }
    }
}

impl FromIterator<(ContentHash, u64)> for FeedIndex {
    fn from_iter<I: IntoIterator<Item = (ContentHash, u64)>>(iter: I) -> Self {
        let mut index = FeedIndex::new();
        for (hash, ts) in iter {
            index.insert(hash, ts);
        }
        index
    }
}
