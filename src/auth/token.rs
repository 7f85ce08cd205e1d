// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Stateless bearer-token codec.
//!
//! Tokens are HS256 JWTs carrying `{sub, iat, exp}` with a 7-day validity
//! window. Issuing and verifying are pure computations over the configured
//! secret; no record of issued tokens is kept anywhere.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::models::UserId;

/// Token validity window.
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// JWT claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Signs and verifies bearer tokens.
///
/// Constructed once at startup from the configured signing secret and shared
/// read-only across requests.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed token for `subject`, expiring 7 days from now.
    pub fn issue(&self, subject: &UserId) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.0.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return its subject.
    ///
    /// Expiry is strict: a token is rejected the moment the current time
    /// reaches its `exp` claim. Expiry maps to [`AuthError::TokenExpired`];
    /// every other decode failure (bad signature, malformed structure, wrong
    /// algorithm) maps to [`AuthError::InvalidSignature`]. Signature checking
    /// is delegated to the `jsonwebtoken` primitive.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        let token_data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidSignature,
            })?;

        Ok(UserId(token_data.claims.sub))
    }
}
