//! # VoteLedger
//!
//! Pure toggle/replace logic over a post's `likedBy` sequence. The
//! invariant protected here: a given user holds at most one active vote
//! (like xor dislike) on a given post.

use domains::models::{VoteOutcome, VoteRecord};
use domains::{AppError, Result};
use uuid::Uuid;

/// What to do with the ledger for an incoming vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VoteDecision {
    /// First vote by this user: append a new record.
    Append,
    /// Opposite polarity exists at `index`: replace it.
    Replace { index: usize },
}

/// Scans the ledger for `user_id` and decides the vote's fate.
///
/// Same-polarity repeats are a `Conflict` naming the existing direction;
/// the caller must change direction explicitly rather than retry.
pub(crate) fn decide(
    liked_by: &[VoteRecord],
    user_id: &str,
    like: bool,
    post_id: Uuid,
) -> Result<VoteDecision> {
    for (index, record) in liked_by.iter().enumerate() {
        if record.user_id == user_id {
            if record.like == like {
                let verb = if like { "liked" } else { "disliked" };
                return Err(AppError::Conflict(format!(
                    "You already {verb} post {post_id}"
                )));
            }
            return Ok(VoteDecision::Replace { index });
        }
    }
    Ok(VoteDecision::Append)
}

/// Applies a decision to the in-memory ledger. A replaced record is
/// removed at its old position and the new one appended; callers get no
/// ordering promise, only membership and per-user uniqueness.
pub(crate) fn apply(
    liked_by: &mut Vec<VoteRecord>,
    decision: VoteDecision,
    record: VoteRecord,
) -> VoteOutcome {
    match decision {
        VoteDecision::Append => {
            liked_by.push(record);
            VoteOutcome::Applied
        }
        VoteDecision::Replace { index } => {
            liked_by.remove(index);
            liked_by.push(record);
            VoteOutcome::Replaced
        }
    }
}
