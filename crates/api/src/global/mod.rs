// Path: crates/api/src/global/mod.rs

//! Global state owned by components outside the gateway.
//!
//! The registry, moderation lists and feed whitelist live for the whole
//! process and are updated out-of-band. Each is held in a [`Published`]
//! handle: writers build a new value and swap it in atomically, readers take
//! an `Arc` snapshot per request and never observe a half-applied update.

use agora_types::app::{Identifier, ProfileEntry};
use agora_types::error::GlobalStateError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

mod feed_index;

pub use feed_index::FeedIndex;

/// Opaque per-account moderation payloads, interpreted only by clients.
pub type ModerationRecord = BTreeMap<Identifier, Vec<u8>>;

/// The verified-username registry: lowercase username to account.
pub type VerifiedUsernameMap = BTreeMap<String, Identifier>;

/// A copy-on-write publication cell.
#[derive(Debug, Default)]
pub struct Published<T> {
    current: RwLock<Arc<T>>,
}

impl<T> Published<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(value)),
        }
    }

    /// Returns the currently published value.
    pub fn load(&self) -> Arc<T> {
        self.current.read().clone()
    }

    /// Replaces the published value.
    pub fn publish(&self, value: T) {
        *self.current.write() = Arc::new(value);
    }
}

impl<T: Clone> Published<T> {
    /// Clones the current value, lets `f` modify the copy, then publishes it.
    ///
    /// Concurrent `update` calls are serialized; readers keep whatever `Arc`
    /// they already loaded.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.current.write();
        let mut next = T::clone(&guard);
        let out = f(&mut next);
        *guard = Arc::new(next);
        out
    }
}

/// The binary switch consulted first by every global-state operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureGate {
    enabled: bool,
}

impl ExposureGate {
    /// Creates a gate from the configured exposure flag.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Pure read of the exposure flag.
    pub const fn allowed(&self) -> bool {
        self.enabled
    }

    /// Fails with [`GlobalStateError::FeatureDisabled`] when exposure is off.
    pub fn check(&self) -> Result<(), GlobalStateError> {
        if self.enabled {
            Ok(())
        } else {
            Err(GlobalStateError::FeatureDisabled)
        }
    }
}

/// The bundle of out-of-band global state the gateway reads.
#[derive(Debug, Default)]
pub struct GlobalState {
    /// Verified usernames.
    pub verified_usernames: Published<VerifiedUsernameMap>,
    /// Blacklisted accounts and their moderation payloads.
    pub blacklist: Published<ModerationRecord>,
    /// Graylisted accounts and their moderation payloads.
    pub graylist: Published<ModerationRecord>,
    /// The whitelist the global feed is drawn from.
    pub feed_whitelist: Published<FeedIndex>,
}

impl GlobalState {
    /// Creates an empty global state.
    pub fn new() -> Self {
        Self::default()
    }
}

/// True if `profile`'s username is registered as verified to its own account.
pub fn is_verified(registry: &VerifiedUsernameMap, profile: &ProfileEntry) -> bool {
    registry
        .get(&profile.username.to_lowercase())
        .is_some_and(|id| *id == profile.public_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, key: u8) -> ProfileEntry {
        ProfileEntry {
            public_key: Identifier([key; 33]),
            username: name.to_string(),
            description: String::new(),
            is_hidden: false,
        }
    }

    #[test]
    fn readers_keep_their_snapshot_across_updates() {
        let cell = Published::new(vec![1, 2, 3]);
        let before = cell.load();
        cell.update(|v| v.push(4));
        assert_eq!(*before, vec![1, 2, 3]);
        assert_eq!(*cell.load(), vec![1, 2, 3, 4]);

        cell.publish(Vec::new());
        assert!(cell.load().is_empty());
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn gate_reports_feature_disabled() {
        assert!(ExposureGate::new(true).check().is_ok());
        let gate = ExposureGate::new(false);
        assert!(!gate.allowed());
        assert_eq!(gate.check(), Err(GlobalStateError::FeatureDisabled));
    }

    #[test]
    fn verification_is_case_insensitive_and_key_bound() {
        let mut registry = VerifiedUsernameMap::new();
        registry.insert("alice".into(), Identifier([1; 33]));
        assert!(is_verified(&registry, &profile("Alice", 1)));
        assert!(!is_verified(&registry, &profile("alice", 2)));
        assert!(!is_verified(&registry, &profile("bob", 1)));
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let cell = Arc::new(Published::new(0u64));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = cell.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        cell.update(|n| *n += 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*cell.load(), 800);
    }
}
