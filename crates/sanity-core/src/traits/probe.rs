// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Existence probe for candidate plugin locations.

use std::path::Path;

use async_trait::async_trait;

/// Answers whether a filesystem entry exists.
///
/// Probes never fail: anything that prevents confirming existence counts as
/// absence, so a lookup simply moves on to the next candidate.
#[async_trait]
pub trait PathProbe: Send + Sync + 'static {
    /// Returns `true` if `path` exists.
    async fn exists(&self, path: &Path) -> bool;
}
