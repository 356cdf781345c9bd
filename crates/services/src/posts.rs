//! # PostService
//!
//! The single entry point the surrounding layers (routing, auth) call
//! into. Orchestrates the moderation gate, vote ledger, tag index, and
//! reply thread against the `ItemStore` port.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use domains::models::{Identity, Post, PostPatch, Reply, Role, UpdatedFields, VoteOutcome, VoteRecord};
use domains::traits::{Item, ItemClass, ItemKey, ItemStore, WriteCondition};
use domains::{AppError, Result, StoreError};

use crate::moderation::{self, UpdatePlan};
use crate::{replies, tags, vote};

/// Attempt cap for the revision/identity-guarded write loops. Losing this
/// many races in a row surfaces as `StoreError::Contention`.
const MAX_CONDITIONAL_ATTEMPTS: u32 = 4;

/// Orchestrates post engagement and moderation against the item store.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn ItemStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Creates a post. `score` is re-checked against `[0,100]` here as the
    /// final guard even though the boundary layer validates its presence
    /// and type.
    pub async fn create_post(
        &self,
        posted_by: &str,
        description: String,
        score: i64,
        title: String,
        song: Option<String>,
        tags: Option<BTreeSet<String>>,
    ) -> Result<Post> {
        if !(0..=100).contains(&score) {
            return Err(AppError::Validation(
                "provided score must be of type number 0-100".to_string(),
            ));
        }
        let post = Post {
            item_id: Uuid::new_v4(),
            posted_by: posted_by.to_string(),
            title,
            description,
            score: score as u8,
            song,
            tags: tags.unwrap_or_default(),
            replies: Vec::new(),
            liked_by: Vec::new(),
            is_flagged: 0,
            time: Utc::now(),
            revision: 0,
        };
        self.store
            .put(ItemKey::post(post.item_id), encode_post(&post)?)
            .await?;
        info!(post_id = %post.item_id, posted_by, "created post");
        Ok(post)
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        self.load_post(post_id).await
    }

    /// Applies the patch the moderation gate sanctions for this requester.
    /// Returns the fields actually written; an owner's flag-only patch is
    /// a successful no-op with nothing written.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        requester: &Identity,
        patch: PostPatch,
    ) -> Result<UpdatedFields> {
        let post = self.load_post(post_id).await?;
        let is_owner = post.posted_by == requester.username;
        match moderation::plan_update(requester, is_owner, patch)? {
            UpdatePlan::Skip => {
                debug!(post_id = %post_id, "owner flag ignored, nothing to update");
                Ok(UpdatedFields::default())
            }
            UpdatePlan::Apply(fields) => {
                let mut item = Item::new();
                if let Some(description) = &fields.description {
                    item.insert("description".to_string(), json!(description));
                }
                if let Some(title) = &fields.title {
                    item.insert("title".to_string(), json!(title));
                }
                if let Some(score) = fields.score {
                    item.insert("score".to_string(), json!(score));
                }
                if let Some(flag) = fields.is_flagged {
                    item.insert("isFlagged".to_string(), json!(flag));
                }
                self.store
                    .update_set(ItemKey::post(post_id), item, None)
                    .await?;
                info!(post_id = %post_id, requester = %requester.username, "updated post");
                Ok(fields)
            }
        }
    }

    /// Full scan filtered to the given flag value.
    pub async fn list_flagged(&self, flag: i64) -> Result<Vec<Post>> {
        if !(0..=1).contains(&flag) {
            return Err(AppError::Validation("isFlagged must be 0 or 1".to_string()));
        }
        let posts = self.scan_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|post| i64::from(post.is_flagged) == flag)
            .collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Post>> {
        self.scan_posts().await
    }

    /// Every post created by `username`, in scan order.
    pub async fn list_by_author(&self, username: &str) -> Result<Vec<Post>> {
        let posts = self.scan_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|post| post.posted_by == username)
            .collect())
    }

    /// Tag-membership filter over a full scan. Inclusive = OR semantics,
    /// exclusive = AND semantics; an empty tag list matches everything.
    pub async fn filter_by_tags(&self, tags: &[String], inclusive: bool) -> Result<Vec<Post>> {
        let posts = self.scan_posts().await?;
        Ok(tags::filter_posts(posts, tags, inclusive))
    }

    /// Appends a reply via the store's atomic list-append, so concurrent
    /// repliers cannot lose each other's writes.
    pub async fn create_reply(
        &self,
        posted_by: &str,
        post_id: Uuid,
        description: String,
    ) -> Result<Reply> {
        self.load_post(post_id).await?;
        let reply = replies::new_reply(posted_by, description);
        self.store
            .update_append(ItemKey::post(post_id), "replies", encode(&reply)?)
            .await?;
        debug!(post_id = %post_id, reply_id = %reply.item_id, "appended reply");
        Ok(reply)
    }

    pub async fn get_reply(&self, post_id: Uuid, reply_id: Uuid) -> Result<Reply> {
        let post = self.load_post(post_id).await?;
        post.replies
            .into_iter()
            .find(|reply| reply.item_id == reply_id)
            .ok_or_else(|| AppError::NotFound(format!("Reply {reply_id} doesn't exist")))
    }

    /// Removes one reply by identity. The delete is positional and guarded
    /// by the expected reply value; when a concurrent writer moved the
    /// target we re-read and try again rather than overwrite the list.
    pub async fn delete_reply(
        &self,
        post_id: Uuid,
        reply_id: Uuid,
        requester: &Identity,
    ) -> Result<()> {
        for _attempt in 1..=MAX_CONDITIONAL_ATTEMPTS {
            let post = self.load_post(post_id).await?;
            let Some(index) = replies::position_of(&post.replies, reply_id) else {
                return Err(AppError::NotFound(format!("Reply {reply_id} doesn't exist")));
            };
            let reply = &post.replies[index];
            if requester.role != Role::Admin
                && requester.username != post.posted_by
                && requester.username != reply.posted_by
            {
                return Err(AppError::Forbidden(
                    "only the reply author, the post owner, or an admin may delete a reply"
                        .to_string(),
                ));
            }
            let expected = encode(reply)?;
            if self
                .store
                .update_delete_at(ItemKey::post(post_id), "replies", index, Some(expected))
                .await?
            {
                debug!(post_id = %post_id, reply_id = %reply_id, "deleted reply");
                return Ok(());
            }
            warn!(post_id = %post_id, reply_id = %reply_id, "reply moved under us, retrying");
        }
        Err(StoreError::Contention(MAX_CONDITIONAL_ATTEMPTS).into())
    }

    /// Records a like/dislike, enforcing at most one active vote per user
    /// per post. The write is a single conditional set of the whole ledger
    /// guarded on the post's revision; on a lost race we re-read and
    /// re-decide, so two same-direction votes can never both land.
    pub async fn vote(&self, like: bool, post_id: Uuid, user_id: &str) -> Result<VoteOutcome> {
        let key = ItemKey::post(post_id);
        for _attempt in 1..=MAX_CONDITIONAL_ATTEMPTS {
            let item = self.store.get(key).await?.ok_or_else(|| {
                AppError::NotFound(format!("Post {post_id} doesn't exist"))
            })?;
            let mut post = decode_post(item)?;

            let decision = vote::decide(&post.liked_by, user_id, like, post_id)?;
            let outcome = vote::apply(
                &mut post.liked_by,
                decision,
                VoteRecord {
                    user_id: user_id.to_string(),
                    like,
                },
            );

            let mut fields = Item::new();
            fields.insert("likedBy".to_string(), encode(&post.liked_by)?);
            fields.insert("revision".to_string(), json!(post.revision + 1));
            let guard = WriteCondition::FieldEquals("revision".to_string(), json!(post.revision));
            if self.store.update_set(key, fields, Some(guard)).await? {
                debug!(post_id = %post_id, user_id, ?outcome, "vote recorded");
                return Ok(outcome);
            }
            warn!(post_id = %post_id, user_id, "vote lost a revision race, retrying");
        }
        Err(StoreError::Contention(MAX_CONDITIONAL_ATTEMPTS).into())
    }

    /// Removes a post entirely. Owner or admin only.
    pub async fn delete_post(&self, post_id: Uuid, requester: &Identity) -> Result<()> {
        let post = self.load_post(post_id).await?;
        if requester.role != Role::Admin && requester.username != post.posted_by {
            return Err(AppError::Forbidden(
                "only the post owner or an admin may delete a post".to_string(),
            ));
        }
        self.store.delete(ItemKey::post(post_id)).await?;
        info!(post_id = %post_id, requester = %requester.username, "deleted post");
        Ok(())
    }

    async fn load_post(&self, post_id: Uuid) -> Result<Post> {
        let item = self.store.get(ItemKey::post(post_id)).await?;
        let Some(item) = item else {
            return Err(AppError::NotFound(format!(
                "Post not found with the id: {post_id}"
            )));
        };
        Ok(decode_post(item)?)
    }

    async fn scan_posts(&self) -> Result<Vec<Post>> {
        let items = self.store.scan(ItemClass::Post).await?;
        let mut posts = Vec::with_capacity(items.len());
        for item in items {
            posts.push(decode_post(item)?);
        }
        Ok(posts)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> std::result::Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|err| StoreError::Backend(format!("serialization: {err}")))
}

fn encode_post(post: &Post) -> std::result::Result<Item, StoreError> {
    match encode(post)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Backend(
            "post did not serialize to an object".to_string(),
        )),
    }
}

fn decode_post(item: Item) -> std::result::Result<Post, StoreError> {
    serde_json::from_value(Value::Object(item))
        .map_err(|err| StoreError::Backend(format!("corrupt post item: {err}")))
}
