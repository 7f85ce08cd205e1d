// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Axum extractors for authenticated identities: the authentication gate.
//!
//! Use the `Auth` extractor in handlers that require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the resolved, password-free user
//! }
//! ```
//!
//! Use `OptionalAuth` on endpoints that personalize for authenticated
//! callers but remain open to anonymous ones; every authentication failure
//! there yields `None` instead of a rejection.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, Identity};
use crate::state::AppState;

/// Extractor for mandatory authentication.
///
/// Pipeline per request: extract the `Bearer` token, verify signature and
/// expiry, resolve the subject to a live user. Each failing step maps to
/// its own 401 reason; a missing header and a malformed prefix are treated
/// identically.
pub struct Auth(pub Identity);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An identity seeded into extensions wins (test seam, middleware).
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(Auth(identity));
        }

        // Exact `Bearer ` prefix required; anything else counts as no token.
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::NoToken)?;

        let subject = state.tokens.verify(token)?;

        let store = state.store.read().await;
        let user = store
            .find_user_by_id(&subject)
            .ok_or(AuthError::UserNotFound)?;

        Ok(Auth(Identity::from(&user)))
    }
}

/// Extractor for optional authentication.
///
/// Runs the same pipeline as [`Auth`] but swallows every failure: the
/// request proceeds anonymously instead of being rejected. Call sites must
/// pattern-match the inner `Option` explicitly.
pub struct OptionalAuth(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(identity)) => Ok(OptionalAuth(Some(identity))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
