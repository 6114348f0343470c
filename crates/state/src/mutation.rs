// Path: crates/state/src/mutation.rs

use agora_types::app::{ContentHash, ContentItem, EngagementKind, Identifier, ProfileEntry};
use agora_types::error::StateError;

/// A not-yet-committed change to public content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingMutation {
    /// Creates or replaces a post.
    PutPost(ContentItem),
    /// Hides (deletes) an existing post.
    HidePost(ContentHash),
    /// Adjusts one engagement aggregate of an existing post.
    AdjustEngagement {
        /// The post being engaged with.
        post: ContentHash,
        /// Which aggregate changes.
        kind: EngagementKind,
        /// Signed change; negative for unlikes and the like.
        delta: i64,
    },
    /// Creates or replaces a profile.
    PutProfile(ProfileEntry),
}

/// Something a mutation can be applied to: the committed maps, or an overlay.
pub(crate) trait MutationTarget {
    fn post(&self, hash: &ContentHash) -> Option<&ContentItem>;
    fn put_post(&mut self, item: ContentItem);
    fn put_profile(&mut self, key: Identifier, profile: ProfileEntry);
}

impl PendingMutation {
    /// Applies the mutation. `confirm_at` stamps the confirmation height on
    /// posts written by a commit; `None` leaves them unconfirmed.
    pub(crate) fn apply_to<T: MutationTarget>(
        &self,
        target: &mut T,
        confirm_at: Option<u64>,
    ) -> Result<(), StateError> {
        match self {
            PendingMutation::PutPost(item) => {
                let mut item = item.clone();
                item.confirmation_block_height = confirm_at;
                target.put_post(item);
            }
            PendingMutation::HidePost(hash) => {
                let mut item = existing(target, hash)?;
                item.is_hidden = true;
                target.put_post(item);
            }
            PendingMutation::AdjustEngagement { post, kind, delta } => {
                let mut item = existing(target, post)?;
                item.engagement.apply(*kind, *delta).ok_or_else(|| {
                    StateError::Apply(format!(
                        "engagement {:?} of post {} cannot change by {}",
                        kind, post, delta
                    ))
                })?;
                target.put_post(item);
            }
            PendingMutation::PutProfile(profile) => {
                target.put_profile(profile.public_key, profile.clone());
            }
        }
        Ok(())
    }
}

fn existing<T: MutationTarget>(target: &T, hash: &ContentHash) -> Result<ContentItem, StateError> {
    target
        .post(hash)
        .cloned()
        .ok_or_else(|| StateError::Apply(format!("post {} not found", hash)))
}
