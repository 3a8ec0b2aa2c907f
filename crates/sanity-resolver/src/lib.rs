// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest resolver.
//!
//! Starting from a project root, the resolver reads the project's
//! `sanity.json`, locates every declared plugin, recursively resolves each
//! plugin's own declared plugins, flattens the resulting tree into one
//! deterministic order, and computes which plugin provides and which plugins
//! fulfill every role.
//!
//! # Usage
//!
//! ```no_run
//! use sanity_resolver::{ResolveOptions, resolve_roles};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let roles = resolve_roles(&ResolveOptions::new("/path/to/project")).await?;
//! for (role, provider) in &roles.provided {
//!     println!("{role} provided by {}", provider.plugin_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod flatten;
pub mod locator;
pub mod manifest;
pub mod roles;
pub mod tree;

use std::path::{Path, PathBuf};

use sanity_core::{PluginNode, PluginTree, ResolutionResult, ResolveError, Result};

pub use flatten::{flatten, flatten_owned};
pub use locator::{FsProbe, PLUGIN_PREFIX, PluginLocator, candidate_paths, package_dir_name};
pub use manifest::{MANIFEST_FILE_NAME, parse_manifest, read_manifest, validate_manifest};
pub use roles::resolve_plugin_roles;
pub use tree::TreeResolver;

/// Options for a resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Project root containing the project `sanity.json`.
    pub base_path: PathBuf,
}

impl ResolveOptions {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// The base path made absolute, so every install path derived from it is absolute.
    pub fn absolute_base_path(&self) -> Result<PathBuf> {
        absolute(&self.base_path)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| ResolveError::BasePath {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the full plugin tree without flattening it.
pub async fn resolve_plugin_tree(options: &ResolveOptions) -> Result<PluginTree> {
    let base_path = options.absolute_base_path()?;
    TreeResolver::new().resolve_project(&base_path).await
}

/// Resolve the project's plugins into their canonical flattened order.
pub async fn resolve_tree(options: &ResolveOptions) -> Result<Vec<PluginNode>> {
    let tree = resolve_plugin_tree(options).await?;
    Ok(flatten_owned(&tree))
}

/// Resolve the project's plugins and compute the provided and fulfilled role maps.
pub async fn resolve_roles(options: &ResolveOptions) -> Result<ResolutionResult> {
    let plugins = resolve_tree(options).await?;
    resolve_plugin_roles(&plugins)
}
