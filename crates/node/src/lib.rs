// Path: crates/node/src/lib.rs
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

//! Support code for the `agora-gateway` binary.

/// Loading demo state from JSON fixtures.
pub mod fixture;
/// Translating process signals into a graceful server shutdown.
pub mod shutdown;
