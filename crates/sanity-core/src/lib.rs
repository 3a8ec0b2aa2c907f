// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the Sanity plugin resolver.
//!
//! This crate holds the manifest model, the resolution result types, the
//! error enum shared by every resolution step, and the trait seams the
//! resolver is generic over.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ConflictParty, ManifestOwner, ResolveError, Result};
pub use traits::PathProbe;
pub use types::{
    FulfillerDescriptor, Fulfillment, Manifest, PluginNode, PluginTree, ProviderDescriptor,
    ResolutionResult, RoleFulfillment, RoleProvision, join_under, normalize_path,
};
