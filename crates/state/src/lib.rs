// Path: crates/state/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # Agora State
//!
//! A reference [`StateSnapshotProvider`](agora_api::state::StateSnapshotProvider):
//! committed posts and profiles held as a copy-on-write value, a pending
//! mutation pool in front of it, and an overlay that merges the two into an
//! immutable view on demand.

/// The committed store and pending pool, and the provider built on them.
pub mod ledger;
/// Pending mutations and the rules for applying them.
pub mod mutation;
/// The merged, read-only view handed to readers.
pub mod view;

pub use ledger::{CommittedState, MemoryLedger};
pub use mutation::PendingMutation;
pub use view::AugmentedView;
