// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Resolved request identity.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{User, UserId};

/// The authenticated user for the duration of one request.
///
/// This is the password-free view of a credential record. It is the only
/// user representation that ever serializes outward; the stored [`User`]
/// keeps the digest and does not implement `Serialize`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Identity {
    /// Canonical user ID (token `sub` claim).
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email (lowercased).
    pub email: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn identity_strips_password_hash() {
        let user = User {
            id: UserId::from("user-1"),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: Utc::now(),
        };

        let identity = Identity::from(&user);
        assert_eq!(identity.id, user.id);
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.email, "a@x.com");

        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }
}
