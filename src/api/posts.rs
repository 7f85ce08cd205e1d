// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Post endpoints.
//!
//! Listing and single-post reads are public (reads use optional auth so
//! owners can see their drafts); creation and mutation require a resolved
//! identity and pass through the ownership policy. A draft hidden from a
//! non-owner is reported as not-found, never as forbidden.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{can_mutate, can_read, Auth, OptionalAuth},
    error::ApiError,
    models::{
        AuthorSummary, CreatePostRequest, PageQuery, Pagination, Post, PostId, PostListResponse,
        PostResponse, UpdatePostRequest,
    },
    state::AppState,
    store::InMemoryStore,
};

/// Response wrapping a post mutation.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostMessageResponse {
    pub message: String,
    pub post: PostResponse,
}

/// Response for a deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

const TITLE_MAX_CHARS: usize = 200;
const CONTENT_MIN_CHARS: usize = 10;

fn validate_post_fields(title: Option<&str>, content: Option<&str>) -> Result<(), ApiError> {
    if let Some(title) = title {
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(ApiError::bad_request(
                "Title cannot be more than 200 characters",
            ));
        }
    }
    if let Some(content) = content {
        if content.chars().count() < CONTENT_MIN_CHARS {
            return Err(ApiError::bad_request(
                "Content must be at least 10 characters",
            ));
        }
    }
    Ok(())
}

fn with_author(store: &InMemoryStore, post: Post) -> PostResponse {
    let username = store
        .find_user_by_id(&post.author)
        .map(|user| user.username)
        .unwrap_or_else(|| "unknown".to_string());
    PostResponse {
        author_details: AuthorSummary {
            id: post.author.clone(),
            username,
        },
        post,
    }
}

/// List published posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PageQuery),
    tag = "Posts",
    responses((status = 200, description = "Page of published posts", body = PostListResponse))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let (page, limit) = query.resolve();
    let store = state.store.read().await;
    let (posts, total) = store.published_page(page, limit);
    let posts = posts
        .into_iter()
        .map(|post| with_author(&store, post))
        .collect();

    Ok(Json(PostListResponse {
        posts,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// Get a single post.
///
/// Drafts are visible only to their author; everyone else gets a 404 so the
/// draft's existence is not leaked. Reads of published posts bump the view
/// counter.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    tag = "Posts",
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "Post not found or not visible"),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    OptionalAuth(identity): OptionalAuth,
) -> Result<Json<PostResponse>, ApiError> {
    let id = PostId(post_id);
    let mut store = state.store.write().await;

    let post = store
        .post_by_id(&id)
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if !can_read(&post, identity.as_ref()) {
        // Deliberately indistinguishable from a missing post.
        return Err(ApiError::not_found("Post not found"));
    }

    let post = if post.published {
        store.record_view(&id).unwrap_or(post)
    } else {
        post
    };

    Ok(Json(with_author(&store, post)))
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Post created", body = PostMessageResponse),
        (status = 400, description = "Missing or out-of-bounds title/content"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostMessageResponse>), ApiError> {
    if request.title.trim().is_empty() || request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Title and content are required"));
    }
    validate_post_fields(Some(&request.title), Some(&request.content))?;

    let mut store = state.store.write().await;
    let post = store.create_post(identity.id, request);
    let response = with_author(&store, post);

    Ok((
        StatusCode::CREATED,
        Json(PostMessageResponse {
            message: "Post created successfully".to_string(),
            post: response,
        }),
    ))
}

/// Update a post (author only).
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Post updated", body = PostMessageResponse),
        (status = 400, description = "Out-of-bounds title/content"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(post_id): Path<String>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostMessageResponse>, ApiError> {
    let id = PostId(post_id);
    let mut store = state.store.write().await;

    let post = store
        .post_by_id(&id)
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if !can_mutate(&post, Some(&identity)) {
        return Err(ApiError::forbidden(
            "Access denied. You can only edit your own posts",
        ));
    }

    validate_post_fields(request.title.as_deref(), request.content.as_deref())?;

    let post = store.update_post(&id, request)?;
    let response = with_author(&store, post);

    Ok(Json(PostMessageResponse {
        message: "Post updated successfully".to_string(),
        post: response,
    }))
}

/// Delete a post (author only).
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Path(post_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = PostId(post_id);
    let mut store = state.store.write().await;

    let post = store
        .post_by_id(&id)
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if !can_mutate(&post, Some(&identity)) {
        return Err(ApiError::forbidden(
            "Access denied. You can only delete your own posts",
        ));
    }

    store.delete_post(&id)?;

    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

/// List the caller's own posts, drafts included, newest first.
#[utoipa::path(
    get,
    path = "/api/posts/user/me",
    params(PageQuery),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page of the caller's posts", body = PostListResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn my_posts(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let (page, limit) = query.resolve();
    let store = state.store.read().await;
    let (posts, total) = store.author_page(&identity.id, page, limit);
    let posts = posts
        .into_iter()
        .map(|post| with_author(&store, post))
        .collect();

    Ok(Json(PostListResponse {
        posts,
        pagination: Pagination::new(page, limit, total),
    }))
}
