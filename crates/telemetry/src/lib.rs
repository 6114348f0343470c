// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Agora Telemetry
//!
//! Observability for the gateway: structured logging initialization and the
//! `/metrics`, `/healthz` and `/readyz` endpoints.

/// Handlers and a router for the Prometheus and health endpoints.
pub mod http;
/// The initialization routine for global structured logging.
pub mod init;
