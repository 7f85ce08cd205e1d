// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Every denial path through the gate maps to exactly one variant. All
/// variants except `Internal` are 401 denials; `Internal` covers unexpected
/// faults and never leaks detail to the caller.
#[derive(Debug)]
pub enum AuthError {
    /// No bearer token present (missing header or malformed prefix)
    NoToken,
    /// Token signature or structure is invalid
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token subject does not resolve to a live user
    UserNotFound,
    /// Internal error (detail logged server-side only)
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NoToken => "no_token",
            AuthError::InvalidSignature => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::UserNotFound => "user_not_found",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NoToken => write!(f, "No token provided, authorization denied"),
            AuthError::InvalidSignature => write!(f, "Invalid token"),
            AuthError::TokenExpired => write!(f, "Token expired"),
            AuthError::UserNotFound => write!(f, "User not found, authorization denied"),
            AuthError::Internal(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal detail stays in the log, not in the response body.
        let message = match &self {
            AuthError::Internal(detail) => {
                tracing::error!(detail = %detail, "auth internal error");
                "Server error in authentication".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(AuthErrorBody {
            error: message,
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
