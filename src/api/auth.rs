// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Registration, login, and profile endpoints.
//!
//! Thin orchestration over the credential store and the token codec. Login
//! failures are deliberately coarse: an unknown email and a wrong password
//! produce the same response, so accounts cannot be enumerated.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::{password, Auth, Identity},
    error::ApiError,
    models::{LoginRequest, RegisterRequest},
    state::AppState,
};

/// Response for successful registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    /// Signed bearer token, valid for 7 days.
    pub token: String,
    /// The authenticated user (password-free).
    pub user: Identity,
}

/// Response for GET /api/auth/profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub user: Identity,
}

fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    let username_len = request.username.trim().chars().count();
    if !(3..=30).contains(&username_len) {
        return Err(ApiError::bad_request("Username must be 3-30 characters"));
    }
    if !request.email.contains('@') {
        return Err(ApiError::bad_request("Please enter a valid email"));
    }
    if request.password.chars().count() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Register a new account and issue a token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation failure or duplicate username/email"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    validate_registration(&request)?;

    let username = request.username.trim().to_string();
    let email = request.email.trim().to_lowercase();

    // Hash before taking the write lock; hashing is the slow part.
    let password_hash = password::hash_secret(&request.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::internal()
    })?;

    let user = {
        let mut store = state.store.write().await;
        store.create_user(username, email, password_hash)?
    };

    let token = state.tokens.issue(&user.id).map_err(|e| {
        tracing::error!(error = %e, "token issuance failed");
        ApiError::internal()
    })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: Identity::from(&user),
        }),
    ))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();

    let user = {
        let store = state.store.read().await;
        store.find_user_by_email(&email)
    };

    // One undifferentiated failure for unknown email and wrong password.
    let Some(user) = user else {
        return Err(ApiError::bad_request("Invalid credentials"));
    };
    if !password::verify_secret(&request.password, &user.password_hash) {
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    let token = state.tokens.issue(&user.id).map_err(|e| {
        tracing::error!(error = %e, "token issuance failed");
        ApiError::internal()
    })?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: Identity::from(&user),
    }))
}

/// Get the current authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile data", body = ProfileResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn profile(Auth(identity): Auth) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile data".to_string(),
        user: identity,
    })
}
