//! # Domain Models
//!
//! These structs represent the core entities of Chorus. Attribute names on
//! the wire keep the store's historical camelCase spelling (`itemID`,
//! `postedBy`, `likedBy`, ...), with `time` as epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A song-review post, the fundamental content unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "itemID")]
    pub item_id: Uuid,
    /// Username of the creator, immutable.
    pub posted_by: String,
    pub title: String,
    pub description: String,
    /// Review score in `[0,100]`.
    pub score: u8,
    /// The reviewed song, set at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<String>,
    /// Tag membership set; settable at creation only.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Ordered reply thread, append/remove only.
    pub replies: Vec<Reply>,
    /// At most one record per distinct voting user.
    pub liked_by: Vec<VoteRecord>,
    /// `0` = visible, `1` = flagged out of normal feeds.
    pub is_flagged: u8,
    /// Creation timestamp, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
    /// Optimistic-concurrency token; bumped by conditional full-list writes.
    #[serde(default)]
    pub revision: u64,
}

/// A reply within a post's thread. Created and destroyed, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "itemID")]
    pub item_id: Uuid,
    pub posted_by: String,
    pub description: String,
}

/// One user's vote on one post. Only the vote ledger touches these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    #[serde(rename = "userID")]
    pub user_id: String,
    /// `true` = like, `false` = dislike.
    pub like: bool,
}

/// Requester role, as vouched for by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// An authenticated requester. Produced by the auth collaborator; the core
/// never issues or verifies tokens itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// Incoming update request for a post. Fields left `None` were absent from
/// the request body; the moderation gate decides what the requester may do
/// with the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub description: Option<String>,
    pub title: Option<String>,
    pub score: Option<i64>,
    /// Moderation flag; only valid values are `0` and `1`.
    pub flag: Option<i64>,
}

/// The fields an update actually wrote, echoed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_flagged: Option<u8>,
}

impl UpdatedFields {
    /// True when the update wrote nothing (e.g. an owner's dropped flag).
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.title.is_none()
            && self.score.is_none()
            && self.is_flagged.is_none()
    }
}

/// Outcome of a vote: a fresh vote, or a toggled replacement of the
/// user's previous opposite vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Applied,
    Replaced,
}
