// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin directory lookup.
//!
//! A plugin may be vendored in the project's `plugins/` directory, installed
//! in a parent plugin's own `node_modules/`, or installed in the project's
//! `node_modules/`. All candidates are probed concurrently, but the winner is
//! always picked by fixed priority, never by which probe answered first.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use sanity_core::{PathProbe, ResolveError, Result};
use tracing::debug;

/// Prefix added to unscoped plugin names to form the package directory name.
pub const PLUGIN_PREFIX: &str = "sanity-plugin-";

/// Directory holding locally vendored plugins.
const LOCAL_PLUGINS_DIR: &str = "plugins";

/// Directory holding installed packages.
const NODE_MODULES_DIR: &str = "node_modules";

/// Package directory name for a plugin.
///
/// Scoped names (`@scope/name`) are used verbatim, everything else is prefixed
/// with [`PLUGIN_PREFIX`].
pub fn package_dir_name(name: &str) -> String {
    if name.starts_with('@') {
        name.to_string()
    } else {
        format!("{PLUGIN_PREFIX}{name}")
    }
}

/// Candidate install locations for `name`, highest priority first.
///
/// The parent plugin's `node_modules/` is only searched when the plugin is a
/// dependency of another plugin.
pub fn candidate_paths(name: &str, base_path: &Path, parent_plugin_path: Option<&Path>) -> Vec<PathBuf> {
    let package = package_dir_name(name);

    let mut candidates = vec![
        base_path.join(LOCAL_PLUGINS_DIR).join(&package),
        base_path.join(LOCAL_PLUGINS_DIR).join(name),
    ];
    if let Some(parent) = parent_plugin_path {
        candidates.push(parent.join(NODE_MODULES_DIR).join(&package));
    }
    candidates.push(base_path.join(NODE_MODULES_DIR).join(&package));

    candidates
}

/// Probes the real filesystem.
///
/// Any entry that `metadata` can see counts, matching how installed packages
/// may be symlinked directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

#[async_trait]
impl PathProbe for FsProbe {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

/// Finds plugin installation directories.
#[derive(Clone)]
pub struct PluginLocator {
    probe: Arc<dyn PathProbe>,
}

impl PluginLocator {
    /// Create a locator backed by the real filesystem.
    pub fn new() -> Self {
        Self::with_probe(Arc::new(FsProbe))
    }

    /// Create a locator backed by a custom probe.
    pub fn with_probe(probe: Arc<dyn PathProbe>) -> Self {
        Self { probe }
    }

    /// Locate the installation directory of `name`.
    ///
    /// Returns the highest-priority existing candidate, or
    /// [`ResolveError::PluginNotFound`] listing every candidate tried.
    pub async fn locate(
        &self,
        name: &str,
        base_path: &Path,
        parent_plugin_path: Option<&Path>,
    ) -> Result<PathBuf> {
        let mut candidates = candidate_paths(name, base_path, parent_plugin_path);

        // join_all yields results in input order regardless of completion order.
        let found = join_all(candidates.iter().map(|c| self.probe.exists(c))).await;

        match found.iter().position(|exists| *exists) {
            Some(index) => {
                let path = candidates.swap_remove(index);
                debug!(plugin = name, path = %path.display(), priority = index, "located plugin");
                Ok(path)
            }
            None => Err(ResolveError::PluginNotFound {
                name: name.to_string(),
                tried: candidates,
            }),
        }
    }
}

impl Default for PluginLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLocator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Probe answering from a fixed map, sleeping per path before answering.
    struct DelayedProbe {
        entries: HashMap<PathBuf, (bool, Duration)>,
    }

    #[async_trait]
    impl PathProbe for DelayedProbe {
        async fn exists(&self, path: &Path) -> bool {
            let (exists, delay) = self
                .entries
                .get(path)
                .copied()
                .unwrap_or((false, Duration::ZERO));
            tokio::time::sleep(delay).await;
            exists
        }
    }

    #[test]
    fn package_dir_name_prefixes_unscoped_names() {
        assert_eq!(package_dir_name("instagram"), "sanity-plugin-instagram");
        assert_eq!(package_dir_name("@sanity/core"), "@sanity/core");
    }

    #[test]
    fn top_level_lookup_has_three_candidates() {
        let candidates = candidate_paths("bar", Path::new("/sanity"), None);
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/sanity/plugins/sanity-plugin-bar"),
                PathBuf::from("/sanity/plugins/bar"),
                PathBuf::from("/sanity/node_modules/sanity-plugin-bar"),
            ]
        );
    }

    #[test]
    fn nested_lookup_inserts_parent_node_modules_third() {
        let parent = PathBuf::from("/sanity/node_modules/sanity-plugin-foo");
        let candidates = candidate_paths("bar", Path::new("/sanity"), Some(&parent));
        assert_eq!(candidates.len(), 4);
        assert_eq!(
            candidates[2],
            PathBuf::from("/sanity/node_modules/sanity-plugin-foo/node_modules/sanity-plugin-bar")
        );
        assert_eq!(
            candidates[3],
            PathBuf::from("/sanity/node_modules/sanity-plugin-bar")
        );
    }

    #[test]
    fn scoped_candidates_keep_scope_directory() {
        let candidates = candidate_paths("@sanity/core", Path::new("/sanity"), None);
        assert_eq!(candidates[0], PathBuf::from("/sanity/plugins/@sanity/core"));
        assert_eq!(candidates[1], PathBuf::from("/sanity/plugins/@sanity/core"));
        assert_eq!(candidates[2], PathBuf::from("/sanity/node_modules/@sanity/core"));
    }

    #[tokio::test(start_paused = true)]
    async fn priority_wins_over_probe_latency() {
        let base = Path::new("/sanity");
        let candidates = candidate_paths("bar", base, None);

        // The highest-priority candidate answers last.
        let probe = DelayedProbe {
            entries: HashMap::from([
                (candidates[0].clone(), (true, Duration::from_millis(500))),
                (candidates[1].clone(), (true, Duration::from_millis(10))),
                (candidates[2].clone(), (true, Duration::ZERO)),
            ]),
        };
        let locator = PluginLocator::with_probe(Arc::new(probe));

        let located = locator.locate("bar", base, None).await.unwrap();
        assert_eq!(located, candidates[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn falls_through_to_lower_priority_candidates() {
        let base = Path::new("/sanity");
        let parent = PathBuf::from("/sanity/node_modules/sanity-plugin-foo");
        let candidates = candidate_paths("bar", base, Some(&parent));

        let probe = DelayedProbe {
            entries: HashMap::from([
                (candidates[2].clone(), (true, Duration::from_millis(300))),
                (candidates[3].clone(), (true, Duration::ZERO)),
            ]),
        };
        let locator = PluginLocator::with_probe(Arc::new(probe));

        let located = locator.locate("bar", base, Some(&parent)).await.unwrap();
        assert_eq!(located, candidates[2]);
    }

    #[tokio::test]
    async fn missing_plugin_reports_every_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("node_modules/sanity-plugin-foo");

        let err = PluginLocator::new()
            .locate("missing", dir.path(), None)
            .await
            .unwrap_err();
        match err {
            ResolveError::PluginNotFound { name, tried } => {
                assert_eq!(name, "missing");
                assert_eq!(tried, candidate_paths("missing", dir.path(), None));
                assert_eq!(tried.len(), 3);
            }
            other => panic!("expected PluginNotFound, got {other:?}"),
        }

        let err = PluginLocator::new()
            .locate("missing", dir.path(), Some(&parent))
            .await
            .unwrap_err();
        match err {
            ResolveError::PluginNotFound { tried, .. } => assert_eq!(tried.len(), 4),
            other => panic!("expected PluginNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fs_probe_sees_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("plugins/bar")).unwrap();

        let located = PluginLocator::new()
            .locate("bar", dir.path(), None)
            .await
            .unwrap();
        assert_eq!(located, dir.path().join("plugins/bar"));
    }
}
