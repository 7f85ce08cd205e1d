// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Identity,
    models::{
        AuthorSummary, CreatePostRequest, LoginRequest, Pagination, Post, PostId,
        PostListResponse, PostResponse, RegisterRequest, UpdatePostRequest, UserId,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod posts;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/user/me", get(posts::my_posts))
        .route(
            "/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::profile,
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        posts::my_posts,
        health::health
    ),
    components(
        schemas(
            UserId,
            PostId,
            Identity,
            RegisterRequest,
            LoginRequest,
            auth::AuthResponse,
            auth::ProfileResponse,
            Post,
            PostResponse,
            AuthorSummary,
            CreatePostRequest,
            UpdatePostRequest,
            PostListResponse,
            Pagination,
            posts::PostMessageResponse,
            posts::MessageResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login, and profile"),
        (name = "Posts", description = "Post creation, listing, and owner-gated mutation"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;
