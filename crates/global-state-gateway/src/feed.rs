// Path: crates/global-state-gateway/src/feed.rs

//! The global feed assembler: turns a stateless page request into an ordered,
//! duplicate-free slice of whitelisted content.

use agora_api::global::FeedIndex;
use agora_api::state::StateSnapshot;
use agora_types::app::{ContentHash, ContentItem};
use agora_types::error::GlobalStateError;
use serde::Deserialize;

/// The feed request as it arrives on the wire.
///
/// Field names follow the historical PascalCase API; camelCase spellings are
/// accepted as well.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetGlobalFeedRequest {
    /// Hex hash of the last item of the previous page; empty or absent for the first page.
    #[serde(alias = "postHashHex")]
    pub post_hash_hex: Option<String>,
    /// Requested page size; 0 or absent selects the default.
    #[serde(alias = "numToFetch")]
    pub num_to_fetch: Option<i64>,
    /// Only return items with attached media.
    #[serde(alias = "mediaRequired")]
    pub media_required: Option<bool>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Resume strictly after this item; `None` starts at the top of the feed.
    pub cursor: Option<ContentHash>,
    /// Maximum number of items to return. Always positive.
    pub page_size: usize,
    /// Skip items without media.
    pub media_required: bool,
}

impl PageRequest {
    /// Validates a wire request, substituting `default_page_size` for 0 or absent.
    pub fn from_wire(
        req: GetGlobalFeedRequest,
        default_page_size: usize,
    ) -> Result<Self, GlobalStateError> {
        let cursor = match req.post_hash_hex.as_deref() {
            None | Some("") => None,
            Some(hex) => Some(
                ContentHash::from_hex(hex)
                    .map_err(|e| GlobalStateError::InvalidCursor(e.to_string()))?,
            ),
        };
        let page_size = match req.num_to_fetch.unwrap_or(0) {
            n if n < 0 => return Err(GlobalStateError::InvalidPageSize(n)),
            0 => default_page_size,
            n => usize::try_from(n).map_err(|_| GlobalStateError::InvalidPageSize(n))?,
        };
        Ok(Self {
            cursor,
            page_size: page_size.max(1),
            media_required: req.media_required.unwrap_or(false),
        })
    }
}

/// Collects up to `page.page_size` items in walk order.
///
/// The walk runs over the whitelist strictly after `page.cursor` (or from the
/// top when the cursor is absent or no longer whitelisted). Candidates the
/// snapshot cannot resolve, hidden items, and, when media is required, items
/// without media are skipped. The hash of the last returned item is the
/// cursor for the next page; a short page means the feed is exhausted.
pub fn assemble<'s>(
    whitelist: &FeedIndex,
    snapshot: &'s dyn StateSnapshot,
    page: &PageRequest,
) -> Vec<&'s ContentItem> {
    let mut out = Vec::with_capacity(page.page_size.min(whitelist.len()));
    for hash in whitelist.walk_after(page.cursor.as_ref()) {
        if out.len() >= page.page_size {
            break;
        }
        let Some(item) = snapshot.content_item(hash) else {
            tracing::trace!(target: "feed", %hash, "whitelisted item not in snapshot");
            continue;
        };
        if item.is_hidden {
            continue;
        }
        if page.media_required && !item.has_media() {
            continue;
        }
        out.push(item);
    }
    out
}
