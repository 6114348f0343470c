// Path: crates/global-state-gateway/src/lib.rs
//! A feature-gated, read-only HTTP projection of global state: the verified
//! username registry, the moderation lists and the paginated global feed.
#![forbid(unsafe_code)]
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

mod error;
pub mod feed;
mod metrics;
pub mod projection;
mod server;
pub mod service;
mod writer;

pub use error::AppError;
pub use feed::{assemble, GetGlobalFeedRequest, PageRequest};
pub use projection::{PostEntryResponse, ProfileEntryResponse, Projector, MAX_REPOST_DEPTH};
pub use server::{
    router, run_server, BLACKLIST_ROUTE, GLOBAL_FEED_ROUTE, GRAYLIST_ROUTE,
    VERIFIED_USERNAMES_ROUTE,
};
pub use service::{GlobalStateService, ModerationResponse};
pub use writer::write_json;
