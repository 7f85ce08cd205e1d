// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Quill - Blog API with stateless bearer authentication
//!
//! A small blog service whose core is request authentication and
//! authorization: issuing and verifying signed bearer tokens, attaching a
//! resolved identity to requests, and enforcing per-post ownership.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, authentication gate, ownership policy
//! - `store` - In-memory user/post document store
//! - `config` - Environment-driven configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
