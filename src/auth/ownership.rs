// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quill Contributors

//! Ownership policy for owned resources.
//!
//! Pure, side-effect-free decisions invoked by resource handlers after the
//! authentication gate has (optionally) attached an identity. How a denial
//! is surfaced is the handler's concern: read denial on a draft is reported
//! as not-found so drafts don't leak their existence, while mutation denial
//! on an existing resource is a distinct 403.

use super::Identity;
use crate::models::{Post, UserId};

/// A resource with a single owner and a visibility flag.
pub trait OwnedResource {
    /// The owning user's id.
    fn owner_id(&self) -> &UserId;
    /// Whether the resource is publicly visible.
    fn is_public(&self) -> bool;
}

impl OwnedResource for Post {
    fn owner_id(&self) -> &UserId {
        &self.author
    }

    fn is_public(&self) -> bool {
        self.published
    }
}

/// May `identity` read `resource`?
///
/// Public resources are readable by anyone, drafts only by their owner.
pub fn can_read(resource: &impl OwnedResource, identity: Option<&Identity>) -> bool {
    resource.is_public() || identity.is_some_and(|id| &id.id == resource.owner_id())
}

/// May `identity` mutate or delete `resource`?
///
/// Owner only; an absent identity is always denied.
pub fn can_mutate(resource: &impl OwnedResource, identity: Option<&Identity>) -> bool {
    identity.is_some_and(|id| &id.id == resource.owner_id())
}
