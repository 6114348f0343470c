// Path: crates/types/src/app/content.rs

//! Public content items (posts), their engagement aggregates and the poster
//! profiles that give them context.

use super::{ContentHash, Identifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The decoded JSON body of a post as it is stored on chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBody {
    /// The text of the post.
    #[serde(rename = "Body", default)]
    pub body: String,
    /// Attached image URLs.
    #[serde(rename = "ImageURLs", default)]
    pub image_urls: Vec<String>,
    /// Attached video URLs.
    #[serde(rename = "VideoURLs", default)]
    pub video_urls: Vec<String>,
}

impl PostBody {
    /// True if at least one non-empty image or video URL is attached.
    pub fn has_media(&self) -> bool {
        self.image_urls
            .iter()
            .chain(self.video_urls.iter())
            .any(|url| !url.trim().is_empty())
    }

    /// Encodes the body into the raw bytes stored on a [`ContentItem`].
    pub fn to_bytes(&self) -> Vec<u8> {
        // Serializing a struct of strings into a Vec cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Which engagement aggregate a pending mutation adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum EngagementKind {
    /// Likes.
    Like,
    /// Diamonds (tips).
    Diamond,
    /// Replies.
    Comment,
    /// Plain reposts.
    Repost,
    /// Reposts with a quote.
    QuoteRepost,
}

/// Engagement aggregates of a content item, as of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    /// Number of likes.
    pub likes: u64,
    /// Number of diamonds.
    pub diamonds: u64,
    /// Number of replies.
    pub comments: u64,
    /// Number of plain reposts.
    pub reposts: u64,
    /// Number of quote reposts.
    pub quote_reposts: u64,
}

impl Engagement {
    /// Applies a signed delta to one aggregate. Returns `None` if the result
    /// would underflow or overflow, leaving `self` untouched.
    pub fn apply(&mut self, kind: EngagementKind, delta: i64) -> Option<()> {
        let slot = match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Diamond => &mut self.diamonds,
            EngagementKind::Comment => &mut self.comments,
            EngagementKind::Repost => &mut self.reposts,
            EngagementKind::QuoteRepost => &mut self.quote_reposts,
        };
        *slot = slot.checked_add_signed(delta)?;
        Some(())
    }
}

/// One unit of public content.
///
/// Created by the ledger or the pending pool and read-only inside the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// The unique content hash; the pagination cursor value.
    pub hash: ContentHash,
    /// The author.
    pub poster: Identifier,
    /// The raw JSON body, decoded into a [`PostBody`] on demand.
    pub body: Vec<u8>,
    /// The post this one replies to, if any.
    pub parent_hash: Option<ContentHash>,
    /// The post this one reposts, if any.
    pub reposted_hash: Option<ContentHash>,
    /// True if the repost carries its own body.
    pub is_quoted_repost: bool,
    /// Creation time in nanoseconds since the Unix epoch.
    pub timestamp_nanos: u64,
    /// Hidden (deleted) by its author.
    pub is_hidden: bool,
    /// Pinned to the global feed.
    pub is_pinned: bool,
    /// The block height at which the item was confirmed. `None` while pending.
    pub confirmation_block_height: Option<u64>,
    /// Engagement aggregates.
    pub engagement: Engagement,
    /// Free-form extra data attached by the poster.
    pub extra_data: BTreeMap<String, Vec<u8>>,
}

impl ContentItem {
    /// Decodes the stored body.
    pub fn decode_body(&self) -> Result<PostBody, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// True if the item has attached media. A body that fails to decode has none.
    pub fn has_media(&self) -> bool {
        self.decode_body().map(|b| b.has_media()).unwrap_or(false)
    }
}

/// The public profile of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    /// The account this profile belongs to.
    pub public_key: Identifier,
    /// The chosen username.
    pub username: String,
    /// The free-form description.
    pub description: String,
    /// Hidden by the account owner.
    pub is_hidden: bool,
}
