// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! # Authentication Module
//!
//! Stateless bearer-token authentication and per-resource ownership checks.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in and receives a signed JWT
//! 2. Client sends `Authorization: Bearer <token>` on later requests
//! 3. Server:
//!    - Verifies the HS256 signature and expiry ([`TokenCodec`])
//!    - Resolves `sub` to a live user record ([`Identity`])
//!    - Attaches the identity to the request, or rejects with 401
//!
//! ## Security
//!
//! - Tokens are stateless: no server-side session record, 7-day validity
//! - Password digests use Argon2id; plaintext never persists
//! - Clock skew tolerance is 60 seconds
//! - Draft visibility and mutation are gated by the ownership policy

pub mod error;
pub mod extractor;
pub mod identity;
pub mod ownership;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use identity::Identity;
pub use ownership::{can_mutate, can_read, OwnedResource};
pub use token::TokenCodec;
