// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

//! # Agora Types
//!
//! The foundational library for the Agora global-state gateway, containing the
//! core data structures, the public-key codec, configuration objects and the
//! error taxonomy.
//!
//! ## Architectural Role
//!
//! As the base crate, `agora-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. Shared types like
//! `Identifier`, `ContentHash` and `ContentItem` live here so the state
//! provider and the gateway agree on a single canonical definition.

/// Core application-level data structures like `Identifier` and `ContentItem`.
pub mod app;
/// The canonical public-string encoding for identifiers.
pub mod codec;
/// Shared configuration structures (e.g., `GatewayConfig`).
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::GlobalStateError> = std::result::Result<T, E>;
