// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! In-memory document store for users and posts.
//!
//! This is the credential-store / post-store collaborator behind the auth
//! core. Lookups are by id, email, or username; uniqueness of username and
//! email is enforced here, atomically under the caller's write lock.
//! Emails are compared case-insensitively and stored lowercased.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreatePostRequest, Post, PostId, UpdatePostRequest, User, UserId};

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<UserId, User>,
    posts: HashMap<PostId, Post>,
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn find_user_by_id(&self, id: &UserId) -> Option<User> {
        self.users.get(id).cloned()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Insert a new credential record.
    ///
    /// `password_hash` must already be a digest; this method never sees a
    /// plaintext secret. Rejects duplicate usernames and duplicate emails
    /// (case-insensitive) without creating a record.
    pub fn create_user(
        &mut self,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<User, ApiError> {
        let username = username.into();
        let email = email.into().to_lowercase();

        let taken = self.users.values().any(|user| {
            user.username == username || user.email.eq_ignore_ascii_case(&email)
        });
        if taken {
            return Err(ApiError::bad_request("User already exists"));
        }

        let user = User {
            id: UserId(Uuid::new_v4().to_string()),
            username,
            email,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    // =========================================================================
    // Posts
    // =========================================================================

    pub fn post_by_id(&self, id: &PostId) -> Option<Post> {
        self.posts.get(id).cloned()
    }

    pub fn create_post(&mut self, author: UserId, request: CreatePostRequest) -> Post {
        let now = Utc::now();
        let post = Post {
            id: PostId(Uuid::new_v4().to_string()),
            title: request.title,
            content: request.content,
            author,
            tags: normalize_tags(request.tags),
            published: request.published,
            published_at: request.published.then_some(now),
            views: 0,
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(post.id.clone(), post.clone());
        post
    }

    /// Apply a partial update to a post.
    ///
    /// `published_at` is set when the post is first published and cleared
    /// when it is unpublished. Ownership must be checked by the caller
    /// before mutating.
    pub fn update_post(
        &mut self,
        id: &PostId,
        request: UpdatePostRequest,
    ) -> Result<Post, ApiError> {
        let Some(post) = self.posts.get_mut(id) else {
            return Err(ApiError::not_found("Post not found"));
        };

        if let Some(title) = request.title {
            post.title = title;
        }
        if let Some(content) = request.content {
            post.content = content;
        }
        if let Some(tags) = request.tags {
            post.tags = normalize_tags(tags);
        }
        if let Some(published) = request.published {
            post.published = published;
        }

        if post.published && post.published_at.is_none() {
            post.published_at = Some(Utc::now());
        }
        if !post.published && post.published_at.is_some() {
            post.published_at = None;
        }

        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    pub fn delete_post(&mut self, id: &PostId) -> Result<(), ApiError> {
        if self.posts.remove(id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Post not found"))
        }
    }

    /// Increment the view counter and return the refreshed post.
    /// Drafts are never counted.
    pub fn record_view(&mut self, id: &PostId) -> Option<Post> {
        let post = self.posts.get_mut(id)?;
        if post.published {
            post.views += 1;
        }
        Some(post.clone())
    }

    /// Page of published posts, newest `published_at` first.
    pub fn published_page(&self, page: u64, limit: u64) -> (Vec<Post>, u64) {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| post.published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Self::slice_page(posts, page, limit)
    }

    /// Page of one author's posts (drafts included), newest first.
    pub fn author_page(&self, author: &UserId, page: u64, limit: u64) -> (Vec<Post>, u64) {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|post| &post.author == author)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self::slice_page(posts, page, limit)
    }

    fn slice_page(posts: Vec<Post>, page: u64, limit: u64) -> (Vec<Post>, u64) {
        let total = posts.len() as u64;
        let skip = page.saturating_sub(1).saturating_mul(limit) as usize;
        let page_items = posts
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();
        (page_items, total)
    }
}
