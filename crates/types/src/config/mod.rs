// Path: crates/types/src/config/mod.rs

//! Configuration for the global-state gateway (`gateway.toml`).

use crate::codec::Network;
use serde::{Deserialize, Serialize};

/// The number of feed items returned when a request omits `NumToFetch` or sends 0.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// How a failure to build the merged state view is reported to clients.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum SnapshotFailureStatus {
    /// Report as a client error (400), matching the historical behavior.
    #[default]
    BadRequest,
    /// Report as a server error (500).
    Internal,
}

/// Configuration for the global-state gateway.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    /// The network address and port to listen on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Permits disclosure of global state. When false every operation answers "not found".
    #[serde(default)]
    pub expose_global_state: bool,
    /// Selects the public-key prefix used to present identifiers.
    #[serde(default)]
    pub network: Network,
    /// Maximum request body size in KiB, enforced only once the exposure gate passes.
    #[serde(default = "default_body_limit_kb")]
    pub body_limit_kb: usize,
    /// Page size substituted when the request asks for 0 items.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Per-request timeout applied by the transport.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum number of in-flight requests before load shedding.
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
    /// Status class used for `SnapshotUnavailable`.
    #[serde(default)]
    pub snapshot_failure_status: SnapshotFailureStatus,
}

fn default_listen_addr() -> String {
    "127.0.0.1:17001".to_string()
}
fn default_body_limit_kb() -> usize {
    10 * 1024
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_request_timeout_secs() -> u64 {
    2
}
fn default_concurrency_limit() -> usize {
    128
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            expose_global_state: false,
            network: Network::default(),
            body_limit_kb: default_body_limit_kb(),
            default_page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            concurrency_limit: default_concurrency_limit(),
            snapshot_failure_status: SnapshotFailureStatus::default(),
        }
    }
}
