// Path: crates/node/src/fixture.rs

//! Seeds a [`MemoryLedger`] and the published [`GlobalState`] from a JSON
//! fixture, so the gateway can be run without a full node behind it.

use agora_api::global::{FeedIndex, GlobalState, ModerationRecord, VerifiedUsernameMap};
use agora_state::{CommittedState, MemoryLedger, PendingMutation};
use agora_types::app::{ContentHash, ContentItem, Engagement, Identifier, PostBody, ProfileEntry};
use agora_types::codec::PublicKeyCodec;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A post as written in a fixture file. Identifiers use their public string form.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixturePost {
    pub hash: ContentHash,
    pub poster: String,
    pub body: PostBody,
    #[serde(default)]
    pub parent_hash: Option<ContentHash>,
    #[serde(default)]
    pub reposted_hash: Option<ContentHash>,
    #[serde(default)]
    pub is_quoted_repost: bool,
    pub timestamp_nanos: u64,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub diamonds: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub reposts: u64,
    #[serde(default)]
    pub quote_reposts: u64,
    #[serde(default)]
    pub extra_data: BTreeMap<String, String>,
    /// Whether the post is on the global feed whitelist.
    #[serde(default)]
    pub whitelisted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureProfile {
    pub public_key: String,
    pub username: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_hidden: bool,
}

/// The whole fixture file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Fixture {
    pub block_height: u64,
    pub posts: Vec<FixturePost>,
    pub profiles: Vec<FixtureProfile>,
    /// Posts that are only in the pending pool.
    pub pending_posts: Vec<FixturePost>,
    /// Committed posts hidden by a pending mutation.
    pub pending_hides: Vec<ContentHash>,
    /// Username to public-key string.
    pub verified_usernames: BTreeMap<String, String>,
    /// Public-key string to base64 payload.
    pub blacklist: BTreeMap<String, String>,
    /// Public-key string to base64 payload.
    pub graylist: BTreeMap<String, String>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
    }

    /// Builds the ledger and global state described by the fixture.
    pub fn seed(self, codec: &PublicKeyCodec) -> Result<(MemoryLedger, GlobalState)> {
        let height = self.block_height.max(1);
        let mut whitelist = FeedIndex::new();
        let mut committed = CommittedState {
            block_height: height,
            ..Default::default()
        };
        for post in self.posts {
            if post.whitelisted {
                whitelist.insert(post.hash, post.timestamp_nanos);
            }
            let item = post.into_item(codec, Some(height))?;
            committed.posts.insert(item.hash, item);
        }
        for profile in self.profiles {
            let public_key = decode_key(codec, &profile.public_key)?;
            committed.profiles.insert(
                public_key,
                ProfileEntry {
                    public_key,
                    username: profile.username,
                    description: profile.description,
                    is_hidden: profile.is_hidden,
                },
            );
        }

        let ledger = MemoryLedger::new(committed);
        for post in self.pending_posts {
            if post.whitelisted {
                whitelist.insert(post.hash, post.timestamp_nanos);
            }
            ledger.submit(PendingMutation::PutPost(post.into_item(codec, None)?))?;
        }
        for hash in self.pending_hides {
            ledger.submit(PendingMutation::HidePost(hash))?;
        }

        let globals = GlobalState::new();
        globals.feed_whitelist.publish(whitelist);
        globals.verified_usernames.publish(
            self.verified_usernames
                .iter()
                .map(|(name, key)| Ok((name.to_lowercase(), decode_key(codec, key)?)))
                .collect::<Result<VerifiedUsernameMap>>()?,
        );
        globals
            .blacklist
            .publish(moderation(codec, &self.blacklist).context("blacklist")?);
        globals
            .graylist
            .publish(moderation(codec, &self.graylist).context("graylist")?);
        Ok((ledger, globals))
    }
}

impl FixturePost {
    fn into_item(self, codec: &PublicKeyCodec, confirmed_at: Option<u64>) -> Result<ContentItem> {
        Ok(ContentItem {
            hash: self.hash,
            poster: decode_key(codec, &self.poster)?,
            body: self.body.to_bytes(),
            parent_hash: self.parent_hash,
            reposted_hash: self.reposted_hash,
            is_quoted_repost: self.is_quoted_repost,
            timestamp_nanos: self.timestamp_nanos,
            is_hidden: self.is_hidden,
            is_pinned: self.is_pinned,
            confirmation_block_height: confirmed_at,
            engagement: Engagement {
                likes: self.likes,
                diamonds: self.diamonds,
                comments: self.comments,
                reposts: self.reposts,
                quote_reposts: self.quote_reposts,
            },
            extra_data: self
                .extra_data
                .into_iter()
                .map(|(k, v)| (k, v.into_bytes()))
                .collect(),
        })
    }
}

fn decode_key(codec: &PublicKeyCodec, key: &str) -> Result<Identifier> {
    codec
        .decode(key)
        .with_context(|| format!("invalid public key {key:?}"))
}

fn moderation(
    codec: &PublicKeyCodec,
    entries: &BTreeMap<String, String>,
) -> Result<ModerationRecord> {
    entries
        .iter()
        .map(|(key, payload)| {
            let payload = BASE64
                .decode(payload)
                .with_context(|| format!("invalid payload for {key}"))?;
            Ok((decode_key(codec, key)?, payload))
        })
        .collect()
}
