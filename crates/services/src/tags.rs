//! # TagIndex
//!
//! Pure tag-membership filtering over a scanned post collection.

use domains::models::Post;
use std::collections::HashSet;

/// Filters `posts` by tag membership.
///
/// An empty `tags` list returns the input unchanged regardless of mode.
/// `inclusive` selects OR semantics (any requested tag present); exclusive
/// is AND semantics (every requested tag present). A post with no tags
/// matches nothing. The result keeps scan order and is deduplicated by
/// post identity.
pub fn filter_posts(posts: Vec<Post>, tags: &[String], inclusive: bool) -> Vec<Post> {
    if tags.is_empty() {
        return posts;
    }
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|post| {
            let matched = if inclusive {
                tags.iter().any(|tag| post.tags.contains(tag))
            } else {
                tags.iter().all(|tag| post.tags.contains(tag))
            };
            matched && seen.insert(post.item_id)
        })
        .collect()
}
