// Path: crates/api/src/lib.rs

//! # Agora API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Agora API
//!
//! Core traits and interfaces for the global-state gateway. This crate defines
//! the contract between the gateway and the components that own the data it
//! exposes: the state snapshot provider and the out-of-band global state.

/// Process-lifetime global state (registry, moderation lists, feed whitelist)
/// published through copy-on-write handles.
pub mod global;
/// The read contract of the merged committed + pending state view.
pub mod state;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::global::{ExposureGate, FeedIndex, GlobalState, ModerationRecord, Published};
    pub use crate::state::{StateSnapshot, StateSnapshotProvider};
}
