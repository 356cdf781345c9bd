//! # Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! service. Handlers validate request shape, resolve the requester via
//! the auth port, call into `PostService`, and shape the response.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use domains::models::{Identity, Post, PostPatch, Reply};
use domains::traits::IdentityProvider;
use domains::AppError;
use services::PostService;

use crate::error::ApiError;
use crate::validate;

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub auth: Arc<dyn IdentityProvider>,
}

/// Builds the complete post-service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/posts/{id}/replies", post(create_reply))
        .route(
            "/posts/{id}/replies/{reply_id}",
            get(get_reply).delete(delete_reply),
        )
        .route("/posts/{id}/likes", post(vote))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The authenticated requester, resolved from the bearer token.
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Err(ApiError(AppError::Forbidden(
                "missing bearer token".to_string(),
            )));
        };
        let identity = state.auth.verify(token).await?;
        Ok(AuthUser(identity))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[derive(Debug, Deserialize)]
struct CreatePostBody {
    text: Option<String>,
    score: Option<i64>,
    title: Option<String>,
    song: Option<String>,
    tags: Option<BTreeSet<String>>,
}

async fn create_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(body): Json<CreatePostBody>,
) -> Result<Json<Post>, ApiError> {
    // 1. Shape: text, score, and title must be present.
    let text = validate::required_string(body.text, "text")?;
    let score = validate::required_score(body.score)?;
    let title = validate::required_string(body.title, "title")?;

    // 2. Core: range checks and persistence.
    let created = state
        .posts
        .create_post(&identity.username, text, score, title, body.song, body.tags)
        .await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPostsQuery {
    is_flagged: Option<i64>,
    tags: Option<String>,
    inclusive: Option<i64>,
    posted_by: Option<String>,
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    if let Some(flag) = query.is_flagged {
        return Ok(Json(state.posts.list_flagged(flag).await?));
    }
    if let Some(tags) = query.tags {
        let requested: Vec<String> = if tags.is_empty() {
            Vec::new()
        } else {
            tags.split(',').map(str::to_string).collect()
        };
        let inclusive = query.inclusive.unwrap_or(1) == 1;
        return Ok(Json(state.posts.filter_by_tags(&requested, inclusive).await?));
    }
    if let Some(author) = query.posted_by {
        return Ok(Json(state.posts.list_by_author(&author).await?));
    }
    Ok(Json(state.posts.list_all().await?))
}

async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.get_post(post_id).await?))
}

async fn update_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Value>, ApiError> {
    let updated = state.posts.update_post(post_id, &identity, patch).await?;
    Ok(Json(json!({ "id": post_id, "updated": updated })))
}

async fn delete_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.posts.delete_post(post_id, &identity).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct CreateReplyBody {
    text: Option<String>,
}

async fn create_reply(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(body): Json<CreateReplyBody>,
) -> Result<Json<Reply>, ApiError> {
    let text = validate::required_string(body.text, "text")?;
    let reply = state
        .posts
        .create_reply(&identity.username, post_id, text)
        .await?;
    Ok(Json(reply))
}

async fn get_reply(
    State(state): State<AppState>,
    Path((post_id, reply_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Reply>, ApiError> {
    Ok(Json(state.posts.get_reply(post_id, reply_id).await?))
}

async fn delete_reply(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((post_id, reply_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .posts
        .delete_reply(post_id, reply_id, &identity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct VoteBody {
    like: Option<bool>,
}

async fn vote(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(body): Json<VoteBody>,
) -> Result<Json<Value>, ApiError> {
    let like = validate::required_like(body.like)?;
    let outcome = state.posts.vote(like, post_id, &identity.username).await?;
    Ok(Json(json!({ "id": post_id, "outcome": outcome })))
}
