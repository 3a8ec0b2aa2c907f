// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive plugin tree construction.
//!
//! Each declared plugin is located, its manifest read, and its own declared
//! plugins resolved the same way. Siblings resolve concurrently; a node is
//! complete once all of its children are. The first error anywhere aborts the
//! whole resolution and any in-flight sibling work is dropped.

use std::path::Path;

use futures::future::{BoxFuture, FutureExt, try_join_all};
use sanity_core::{Manifest, ManifestOwner, PluginNode, PluginTree, Result};
use tracing::{Instrument, debug_span, info};

use crate::locator::PluginLocator;
use crate::manifest::read_manifest;

/// Builds plugin dependency trees.
#[derive(Debug, Clone, Default)]
pub struct TreeResolver {
    locator: PluginLocator,
}

impl TreeResolver {
    /// Create a resolver that searches the real filesystem.
    pub fn new() -> Self {
        Self::with_locator(PluginLocator::new())
    }

    /// Create a resolver with a custom locator.
    pub fn with_locator(locator: PluginLocator) -> Self {
        Self { locator }
    }

    /// Read the project manifest at `base_path` and resolve its plugin tree.
    pub async fn resolve_project(&self, base_path: &Path) -> Result<PluginTree> {
        let manifest = read_manifest(base_path, &ManifestOwner::Root).await?;
        let tree = self.resolve(manifest, base_path).await?;
        info!(
            base_path = %base_path.display(),
            plugins = tree.plugin_count(),
            "resolved plugin tree"
        );
        Ok(tree)
    }

    /// Resolve every plugin declared by `root_manifest`, recursively.
    pub async fn resolve(&self, root_manifest: Manifest, base_path: &Path) -> Result<PluginTree> {
        let children = self
            .resolve_plugins(&root_manifest.plugins, base_path, None)
            .await?;

        Ok(PluginTree {
            base_path: base_path.to_path_buf(),
            manifest: root_manifest,
            children,
        })
    }

    /// Resolve a list of sibling plugins concurrently, keeping declaration order.
    fn resolve_plugins<'a>(
        &'a self,
        names: &'a [String],
        base_path: &'a Path,
        parent_plugin_path: Option<&'a Path>,
    ) -> BoxFuture<'a, Result<Vec<PluginNode>>> {
        let siblings = names.iter().map(move |name| {
            self.resolve_plugin(name, base_path, parent_plugin_path)
                .instrument(debug_span!("resolve_plugin", plugin = %name))
        });
        try_join_all(siblings).boxed()
    }

    async fn resolve_plugin(
        &self,
        name: &str,
        base_path: &Path,
        parent_plugin_path: Option<&Path>,
    ) -> Result<PluginNode> {
        let install_path = self
            .locator
            .locate(name, base_path, parent_plugin_path)
            .await?;
        let manifest = read_manifest(&install_path, &ManifestOwner::Plugin(name.to_string())).await?;
        let children = self
            .resolve_plugins(&manifest.plugins, base_path, Some(&install_path))
            .await?;

        Ok(PluginNode {
            name: name.to_string(),
            install_path,
            manifest,
            children,
        })
    }
}
