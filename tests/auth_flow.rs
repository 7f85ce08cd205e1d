// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Authentication flow integration tests
//!
//! Exercises the composed router end to end:
//! - registration and login token issuance
//! - bearer authentication on the profile endpoint
//! - draft visibility and owner-gated post mutation

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use quill_api::{api::router, auth::TokenCodec, state::AppState, store::InMemoryStore};
use serde_json::{json, Value};
use tower::util::ServiceExt;

const TEST_SECRET: &[u8] = b"integration-test-secret";

fn test_app() -> Router {
    let state = AppState::new(InMemoryStore::new(), TokenCodec::new(TEST_SECRET));
    router(state)
}

fn request(method: &str, uri: &str, body: Option<&Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, username: &str, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        request(
            "POST",
            "/api/auth/register",
            Some(&json!({"username": username, "email": email, "password": password})),
            None,
        ),
    )
    .await
}

/// Test 1: the full register -> login -> profile scenario.
#[tokio::test]
async fn register_login_profile_flow() {
    let app = test_app();

    // Register with a mixed-case email.
    let (status, body) = register(&app, "alice", "A@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);
    let token_1 = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("password").is_none());

    // Login with the lowercased email yields a second, independent token.
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            Some(&json!({"email": "a@x.com", "password": "secret1"})),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token_2 = body["token"].as_str().unwrap().to_string();

    // Both tokens are independently valid.
    for token in [&token_1, &token_2] {
        let (status, body) = send(
            &app,
            request("GET", "/api/auth/profile", None, Some(token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("password_hash").is_none());
    }
}

/// Test 2: denial reasons are distinct and machine-readable.
#[tokio::test]
async fn profile_denials_carry_reason_codes() {
    let app = test_app();

    // No Authorization header.
    let (status, body) = send(&app, request("GET", "/api/auth/profile", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "no_token");

    // Malformed prefix is treated as no token.
    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/profile")
        .header(header::AUTHORIZATION, "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "no_token");

    // Garbage token.
    let (status, body) = send(
        &app,
        request("GET", "/api/auth/profile", None, Some("garbage")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "invalid_token");

    // Valid signature but unresolvable subject.
    let codec = TokenCodec::new(TEST_SECRET);
    let ghost = codec.issue(&"ghost".into()).unwrap();
    let (status, body) = send(
        &app,
        request("GET", "/api/auth/profile", None, Some(&ghost)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "user_not_found");
}

/// Test 3: duplicate registration is rejected, case-insensitively on email.
#[tokio::test]
async fn duplicate_registration_rejected() {
    let app = test_app();

    let (status, _) = register(&app, "alice", "a@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "alice", "fresh@x.com", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");

    let (status, _) = register(&app, "bob", "A@X.COM", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Test 4: login failure does not reveal whether the email exists.
#[tokio::test]
async fn login_failure_is_opaque() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "secret1").await;

    let (unknown_status, unknown_body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            Some(&json!({"email": "nobody@x.com", "password": "secret1"})),
            None,
        ),
    )
    .await;
    let (wrong_status, wrong_body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            Some(&json!({"email": "a@x.com", "password": "wrong"})),
            None,
        ),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

/// Test 5: draft visibility and ownership gating across two users.
#[tokio::test]
async fn post_ownership_and_draft_visibility() {
    let app = test_app();

    let (_, alice) = register(&app, "alice", "a@x.com", "secret1").await;
    let alice_token = alice["token"].as_str().unwrap().to_string();
    let (_, bob) = register(&app, "bob", "b@x.com", "secret2").await;
    let bob_token = bob["token"].as_str().unwrap().to_string();

    // Alice creates one draft and one published post.
    let (status, draft) = send(
        &app,
        request(
            "POST",
            "/api/posts",
            Some(&json!({"title": "Draft", "content": "hidden words"})),
            Some(&alice_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let draft_id = draft["post"]["id"].as_str().unwrap().to_string();

    let (status, live) = send(
        &app,
        request(
            "POST",
            "/api/posts",
            Some(&json!({"title": "Live", "content": "public words", "published": true})),
            Some(&alice_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let live_id = live["post"]["id"].as_str().unwrap().to_string();

    // Public listing shows only the published post.
    let (status, listing) = send(&app, request("GET", "/api/posts", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["pagination"]["total_posts"], 1);
    assert_eq!(listing["posts"][0]["id"].as_str().unwrap(), live_id);

    // The draft is a 404 for anonymous callers and for Bob alike.
    let uri = format!("/api/posts/{draft_id}");
    let (status, _) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, request("GET", &uri, None, Some(&bob_token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A bad token on an optional-auth read degrades to anonymous, not 401.
    let (status, _) = send(&app, request("GET", &uri, None, Some("garbage"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner sees the draft.
    let (status, body) = send(&app, request("GET", &uri, None, Some(&alice_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["published"], false);

    // Bob cannot edit or delete Alice's post: 403, distinct from 404.
    let live_uri = format!("/api/posts/{live_id}");
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &live_uri,
            Some(&json!({"title": "Hijacked"})),
            Some(&bob_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, request("DELETE", &live_uri, None, Some(&bob_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Mutation requires authentication at all.
    let (status, body) = send(
        &app,
        request("PUT", &live_uri, Some(&json!({"title": "Anon"})), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "no_token");

    // Alice's own listing includes the draft.
    let (status, mine) = send(
        &app,
        request("GET", "/api/posts/user/me", None, Some(&alice_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["pagination"]["total_posts"], 2);

    // And the owner can delete.
    let (status, _) = send(
        &app,
        request("DELETE", &live_uri, None, Some(&alice_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, request("GET", &live_uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Test 6: a token signed with a different secret is rejected.
#[tokio::test]
async fn foreign_secret_token_rejected() {
    let app = test_app();
    let (_, alice) = register(&app, "alice", "a@x.com", "secret1").await;
    let user_id = alice["user"]["id"].as_str().unwrap();

    let foreign = TokenCodec::new(b"some-other-secret");
    let forged = foreign.issue(&user_id.into()).unwrap();

    let (status, body) = send(
        &app,
        request("GET", "/api/auth/profile", None, Some(&forged)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "invalid_token");
}

/// Test 7: the health probe needs no credentials.
#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
