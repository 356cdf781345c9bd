//! # ReplyThread
//!
//! Reply construction and position lookup within a post's thread. The
//! service persists appends with the store's atomic list-append and
//! removals with a guarded positional delete.

use domains::models::Reply;
use uuid::Uuid;

/// Builds a fresh reply with a generated identifier.
pub(crate) fn new_reply(posted_by: &str, description: String) -> Reply {
    Reply {
        item_id: Uuid::new_v4(),
        posted_by: posted_by.to_string(),
        description,
    }
}

/// Position of the reply with `reply_id`, if present.
pub(crate) fn position_of(replies: &[Reply], reply_id: Uuid) -> Option<usize> {
    replies.iter().position(|reply| reply.item_id == reply_id)
}
