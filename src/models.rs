// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! # API Data Models
//!
//! This module defines the domain records and the request/response data
//! structures used by the REST API. Response types derive `Serialize` and
//! `ToSchema` for automatic JSON handling and OpenAPI documentation.
//!
//! ## Id Types
//!
//! The [`UserId`] and [`PostId`] newtypes wrap opaque string identifiers
//! (UUID v4 at creation time). They provide type safety and clear semantics
//! at the handler and policy seams.
//!
//! ## Secrets
//!
//! The stored [`User`] record carries the password digest and therefore
//! deliberately does **not** implement `Serialize`. Every outward
//! representation of a user goes through [`crate::auth::Identity`], which
//! strips the digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Id Types
// =============================================================================

/// Opaque user identifier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        UserId(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.to_string())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Opaque post identifier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(pub String);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        PostId(value)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        PostId(value.to_string())
    }
}

impl From<PostId> for String {
    fn from(value: PostId) -> Self {
        value.0
    }
}

// =============================================================================
// User Models
// =============================================================================

/// A stored credential record.
///
/// The `password_hash` field holds an Argon2id digest in PHC string format;
/// the plaintext secret never persists. This type intentionally does not
/// implement `Serialize`.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Unique username (3-30 characters).
    pub username: String,
    /// Unique email, normalized to lowercase.
    pub email: String,
    /// Argon2id digest of the password.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request to register a new account.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired username (unique, 3-30 characters).
    pub username: String,
    /// Email address (unique, case-insensitive).
    pub email: String,
    /// Plaintext password (at least 6 characters; hashed before storage).
    pub password: String,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Registered email address (case-insensitive).
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

// =============================================================================
// Post Models
// =============================================================================

/// A blog post.
///
/// `author` is immutable after creation; only the author may mutate or
/// delete the post. Drafts (`published == false`) are visible only to the
/// author.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Owning user.
    pub author: UserId,
    /// Lowercased, trimmed tags.
    pub tags: Vec<String>,
    /// Whether the post is publicly visible.
    pub published: bool,
    /// Set when the post is first published, cleared when unpublished.
    pub published_at: Option<DateTime<Utc>>,
    /// Read counter for published posts.
    pub views: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Request to create a post.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    /// Post title (required, non-empty).
    pub title: String,
    /// Post body (required, non-empty).
    pub content: String,
    /// Optional tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publish immediately (defaults to draft).
    #[serde(default)]
    pub published: bool,
}

/// Request to update a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New visibility flag.
    pub published: Option<bool>,
}

/// Author details embedded in post responses.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct AuthorSummary {
    /// Author's user id.
    pub id: UserId,
    /// Author's username.
    pub username: String,
}

/// A post together with its author summary.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct PostResponse {
    #[serde(flatten)]
    pub post: Post,
    /// The post's author.
    pub author_details: AuthorSummary,
}

// =============================================================================
// Pagination
// =============================================================================

/// Page selection query parameters.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number (default 1).
    pub page: Option<u64>,
    /// Page size (default 10, clamped to 1..=100).
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Resolve the query into a concrete (page, limit) pair.
    pub fn resolve(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        (page, limit)
    }
}

/// Pagination envelope returned alongside post listings.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_posts: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Build the envelope from a page request and the total record count.
    pub fn new(page: u64, limit: u64, total_posts: u64) -> Self {
        let total_pages = total_posts.div_ceil(limit);
        Self {
            current_page: page,
            total_pages,
            total_posts,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// A page of posts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_from_and_into_string() {
        let from_str: UserId = "abc".into();
        assert_eq!(from_str.0, "abc");

        let from_string: UserId = String::from("def").into();
        assert_eq!(from_string.0, "def");

        let to_string: String = UserId("ghi".into()).into();
        assert_eq!(to_string, "ghi");
    }

    #[test]
    fn page_query_defaults_and_clamping() {
        let defaults = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(defaults.resolve(), (1, 10));

        let zeroes = PageQuery {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(zeroes.resolve(), (1, 1));

        let oversized = PageQuery {
            page: Some(3),
            limit: Some(5000),
        };
        assert_eq!(oversized.resolve(), (3, 100));
    }

    #[test]
    fn pagination_envelope_math() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page);
        assert!(!p.has_prev_page);

        let last = Pagination::new(3, 10, 25);
        assert!(!last.has_next_page);
        assert!(last.has_prev_page);

        let empty = Pagination::new(1, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
    }
}
