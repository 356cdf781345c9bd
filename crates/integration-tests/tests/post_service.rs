//! Post lifecycle through the service and the memory store.

use std::collections::BTreeSet;

use integration_tests::{admin, memory_service, user};
use uuid::Uuid;

use domains::models::PostPatch;
use domains::AppError;

fn tags(list: &[&str]) -> Option<BTreeSet<String>> {
    Some(list.iter().map(|t| t.to_string()).collect())
}

#[tokio::test]
async fn test_create_then_get_preserves_every_valid_score() {
    let service = memory_service();
    for score in [0, 50, 100] {
        let created = service
            .create_post("alice", "review".to_string(), score, "T".to_string(), None, None)
            .await
            .expect("created");
        let fetched = service.get_post(created.item_id).await.expect("fetched");
        assert_eq!(i64::from(fetched.score), score);
    }
}

#[tokio::test]
async fn test_create_rejects_scores_outside_the_range() {
    let service = memory_service();
    for score in [-1, 101, 1000] {
        let err = service
            .create_post("alice", "review".to_string(), score, "T".to_string(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "score {score}");
    }
}

#[tokio::test]
async fn test_create_initializes_the_post() {
    let service = memory_service();
    let created = service
        .create_post(
            "alice",
            "review".to_string(),
            87,
            "Kind of Blue".to_string(),
            Some("So What".to_string()),
            tags(&["jazz", "classic"]),
        )
        .await
        .expect("created");

    assert_eq!(created.posted_by, "alice");
    assert_eq!(created.is_flagged, 0);
    assert!(created.replies.is_empty());
    assert!(created.liked_by.is_empty());
    assert_eq!(created.song.as_deref(), Some("So What"));
    assert!(created.tags.contains("jazz"));

    let fetched = service.get_post(created.item_id).await.expect("fetched");
    assert_eq!(fetched.tags, created.tags);
    assert_eq!(fetched.song, created.song);
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let err = memory_service().get_post(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_owner_update_applies_only_present_fields() {
    let service = memory_service();
    let created = service
        .create_post("alice", "review".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");

    let patch = PostPatch {
        title: Some("T2".to_string()),
        score: Some(70),
        ..PostPatch::default()
    };
    let updated = service
        .update_post(created.item_id, &user("alice"), patch)
        .await
        .expect("updated");
    assert_eq!(updated.title.as_deref(), Some("T2"));
    assert_eq!(updated.score, Some(70));
    assert_eq!(updated.description, None);

    let fetched = service.get_post(created.item_id).await.expect("fetched");
    assert_eq!(fetched.title, "T2");
    assert_eq!(fetched.score, 70);
    assert_eq!(fetched.description, "review");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let patch = PostPatch {
        title: Some("T".to_string()),
        ..PostPatch::default()
    };
    let err = memory_service()
        .update_post(Uuid::new_v4(), &admin("mod"), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_flagged_validates_the_flag_value() {
    let err = memory_service().list_flagged(2).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert_eq!(msg, "isFlagged must be 0 or 1"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_by_author_filters_the_scan() {
    let service = memory_service();
    for author in ["alice", "bob", "alice"] {
        service
            .create_post(author, "d".to_string(), 50, "T".to_string(), None, None)
            .await
            .expect("created");
    }
    let posts = service.list_by_author("alice").await.expect("listed");
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|post| post.posted_by == "alice"));
    assert_eq!(service.list_all().await.expect("all").len(), 3);
}

#[tokio::test]
async fn test_owner_can_delete_their_post() {
    let service = memory_service();
    let created = service
        .create_post("alice", "d".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");
    service
        .delete_post(created.item_id, &user("alice"))
        .await
        .expect("deleted");
    let err = service.get_post(created.item_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_admin_can_delete_any_post() {
    let service = memory_service();
    let created = service
        .create_post("alice", "d".to_string(), 50, "T".to_string(), None, None)
        .await
        .expect("created");
    service
        .delete_post(created.item_id, &admin("mod"))
        .await
        .expect("deleted");
    assert!(service.list_all().await.expect("all").is_empty());
}
