//! Reply lifecycle: append order, targeted removal, explicit NotFound.

use integration_tests::{admin, memory_service, user};
use uuid::Uuid;

use domains::AppError;

#[tokio::test]
async fn test_reply_to_missing_post_is_not_found() {
    let err = memory_service()
        .create_reply("bob", Uuid::new_v4(), "hello".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_removes_exactly_the_target_and_keeps_order() {
    let service = memory_service();
    let post = service
        .create_post("alice", "d".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");

    let first = service
        .create_reply("bob", post.item_id, "one".to_string())
        .await
        .expect("reply");
    let second = service
        .create_reply("carol", post.item_id, "two".to_string())
        .await
        .expect("reply");
    let third = service
        .create_reply("bob", post.item_id, "three".to_string())
        .await
        .expect("reply");

    service
        .delete_reply(post.item_id, second.item_id, &user("carol"))
        .await
        .expect("deleted");

    let replies = service.get_post(post.item_id).await.expect("post").replies;
    let ids: Vec<Uuid> = replies.iter().map(|r| r.item_id).collect();
    assert_eq!(ids, vec![first.item_id, third.item_id]);
}

#[tokio::test]
async fn test_delete_of_a_missing_reply_is_not_found() {
    let service = memory_service();
    let post = service
        .create_post("alice", "d".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");
    let err = service
        .delete_reply(post.item_id, Uuid::new_v4(), &admin("mod"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_reply_finds_only_existing_replies() {
    let service = memory_service();
    let post = service
        .create_post("alice", "d".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");
    let reply = service
        .create_reply("bob", post.item_id, "hello".to_string())
        .await
        .expect("reply");

    let found = service
        .get_reply(post.item_id, reply.item_id)
        .await
        .expect("found");
    assert_eq!(found.description, "hello");
    assert_eq!(found.posted_by, "bob");

    let err = service
        .get_reply(post.item_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_only_author_owner_or_admin_may_delete_a_reply() {
    let service = memory_service();
    let post = service
        .create_post("alice", "d".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");
    let reply = service
        .create_reply("bob", post.item_id, "hello".to_string())
        .await
        .expect("reply");

    let err = service
        .delete_reply(post.item_id, reply.item_id, &user("mallory"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // The post owner may remove replies under their post.
    service
        .delete_reply(post.item_id, reply.item_id, &user("alice"))
        .await
        .expect("deleted");
}
