// Path: crates/global-state-gateway/src/projection.rs

//! Client-facing response shapes for feed items.

use agora_api::global::{is_verified, VerifiedUsernameMap};
use agora_api::state::StateSnapshot;
use agora_types::app::{ContentItem, ProfileEntry};
use agora_types::codec::PublicKeyCodec;
use agora_types::error::ProjectionError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Levels of a repost chain rendered per item, counting the item itself.
pub const MAX_REPOST_DEPTH: u8 = 2;

/// The poster profile embedded in a [`PostEntryResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileEntryResponse {
    pub public_key_base58_check: String,
    pub username: String,
    pub description: String,
    pub is_hidden: bool,
    pub is_verified: bool,
}

/// A feed item as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostEntryResponse {
    pub post_hash_hex: String,
    pub poster_public_key_base58_check: String,
    #[serde(rename = "ParentStakeID")]
    pub parent_stake_id: String,
    pub body: String,
    #[serde(rename = "ImageURLs")]
    pub image_urls: Vec<String>,
    #[serde(rename = "VideoURLs")]
    pub video_urls: Vec<String>,
    pub reposted_post_entry_response: Option<Box<PostEntryResponse>>,
    pub timestamp_nanos: u64,
    pub is_hidden: bool,
    pub confirmation_block_height: u64,
    pub in_mempool: bool,
    pub profile_entry_response: Option<ProfileEntryResponse>,
    pub like_count: u64,
    pub diamond_count: u64,
    pub comment_count: u64,
    pub repost_count: u64,
    pub quote_repost_count: u64,
    pub is_pinned: bool,
    pub is_quoted_repost: bool,
    pub post_extra_data: BTreeMap<String, String>,
}

/// Projects content items against one snapshot and one registry load.
pub struct Projector<'a> {
    snapshot: &'a dyn StateSnapshot,
    codec: PublicKeyCodec,
    registry: &'a VerifiedUsernameMap,
}

impl<'a> Projector<'a> {
    pub fn new(
        snapshot: &'a dyn StateSnapshot,
        codec: PublicKeyCodec,
        registry: &'a VerifiedUsernameMap,
    ) -> Self {
        Self {
            snapshot,
            codec,
            registry,
        }
    }

    /// Projects a top-level feed item.
    pub fn project(&self, item: &ContentItem) -> Result<PostEntryResponse, ProjectionError> {
        self.project_at_depth(item, MAX_REPOST_DEPTH)
    }

    fn project_at_depth(
        &self,
        item: &ContentItem,
        depth: u8,
    ) -> Result<PostEntryResponse, ProjectionError> {
        let body = item
            .decode_body()
            .map_err(|e| ProjectionError::InvalidBody {
                hash: item.hash.to_hex(),
                reason: e.to_string(),
            })?;

        let reposted = match item.reposted_hash {
            Some(reposted_hash) if depth > 1 => {
                let inner = self.snapshot.content_item(&reposted_hash).ok_or_else(|| {
                    ProjectionError::MissingRepost {
                        hash: item.hash.to_hex(),
                        reposted: reposted_hash.to_hex(),
                    }
                })?;
                Some(Box::new(self.project_at_depth(inner, depth - 1)?))
            }
            _ => None,
        };

        Ok(PostEntryResponse {
            post_hash_hex: item.hash.to_hex(),
            poster_public_key_base58_check: self.codec.encode(&item.poster),
            parent_stake_id: item.parent_hash.map(|h| h.to_hex()).unwrap_or_default(),
            body: body.body,
            image_urls: body.image_urls,
            video_urls: body.video_urls,
            reposted_post_entry_response: reposted,
            timestamp_nanos: item.timestamp_nanos,
            is_hidden: item.is_hidden,
            confirmation_block_height: item.confirmation_block_height.unwrap_or(0),
            in_mempool: self.snapshot.is_pending(&item.hash),
            profile_entry_response: self
                .snapshot
                .profile(&item.poster)
                .map(|p| self.profile(p)),
            like_count: item.engagement.likes,
            diamond_count: item.engagement.diamonds,
            comment_count: item.engagement.comments,
            repost_count: item.engagement.reposts,
            quote_repost_count: item.engagement.quote_reposts,
            is_pinned: item.is_pinned,
            is_quoted_repost: item.is_quoted_repost,
            post_extra_data: item
                .extra_data
                .iter()
                .map(|(k, v)| (k.clone(), String::from_utf8_lossy(v).into_owned()))
                .collect(),
        })
    }

    fn profile(&self, profile: &ProfileEntry) -> ProfileEntryResponse {
        ProfileEntryResponse {
            public_key_base58_check: self.codec.encode(&profile.public_key),
            username: profile.username.clone(),
            description: profile.description.clone(),
            is_hidden: profile.is_hidden,
            is_verified: is_verified(self.registry, profile),
        }
    }
}
