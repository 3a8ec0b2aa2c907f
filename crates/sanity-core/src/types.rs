// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest model and resolution result types.
//!
//! Everything here is built fresh for each resolution call and never mutated
//! once constructed.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Parsed contents of a `sanity.json` manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Names of sub-plugins, in declaration order.
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Roles this plugin owns.
    #[serde(default)]
    pub provides: Vec<RoleProvision>,

    /// Roles this plugin implements.
    #[serde(default)]
    pub fulfills: Vec<RoleFulfillment>,

    /// Top-level fields the resolver does not interpret (e.g. `server`, `api`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A plugin's claim to own a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProvision {
    pub role: String,

    /// Canonical implementation slot, absent for roles without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Whether the role accepts many fulfillers.
    #[serde(default)]
    pub multiple: bool,
}

/// A plugin's implementation of a role provided elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFulfillment {
    pub role: String,

    /// Path relative to the fulfilling plugin's directory.
    pub path: String,
}

/// A located plugin with its manifest and resolved sub-plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginNode {
    /// Name as declared by the parent manifest (e.g. `@sanity/core`, `instagram`).
    pub name: String,
    /// Absolute installation directory.
    pub install_path: PathBuf,
    pub manifest: Manifest,
    /// Sub-plugins, in the order of `manifest.plugins`.
    pub children: Vec<PluginNode>,
}

impl PluginNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(PluginNode::subtree_len).sum::<usize>()
    }
}

/// The virtual root of a resolution.
///
/// It has no name and no install path; its children are the plugins declared
/// by the project manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginTree {
    /// Absolute project root the resolution started from.
    pub base_path: PathBuf,
    /// The project manifest.
    pub manifest: Manifest,
    pub children: Vec<PluginNode>,
}

impl PluginTree {
    /// Number of plugins in the tree, excluding the virtual root.
    pub fn plugin_count(&self) -> usize {
        self.children.iter().map(PluginNode::subtree_len).sum()
    }
}

/// The plugin that owns a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub plugin_name: String,
    pub install_path: PathBuf,
    pub multiple: bool,
}

/// A plugin implementing a role, with the implementation's absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillerDescriptor {
    pub plugin_name: String,
    pub resolved_path: PathBuf,
}

/// Fulfillers bound to a role. `Multiple` exactly when the provider declared `multiple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fulfillment {
    Single(FulfillerDescriptor),
    Multiple(Vec<FulfillerDescriptor>),
}

impl Fulfillment {
    /// All bound fulfillers, in binding order.
    pub fn fulfillers(&self) -> &[FulfillerDescriptor] {
        match self {
            Fulfillment::Single(descriptor) => std::slice::from_ref(descriptor),
            Fulfillment::Multiple(descriptors) => descriptors,
        }
    }

    /// Returns the descriptor for a single-fulfiller role.
    pub fn as_single(&self) -> Option<&FulfillerDescriptor> {
        match self {
            Fulfillment::Single(descriptor) => Some(descriptor),
            Fulfillment::Multiple(_) => None,
        }
    }
}

/// Provided and fulfilled role maps for a whole project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub provided: BTreeMap<String, ProviderDescriptor>,
    pub fulfilled: BTreeMap<String, Fulfillment>,
}

/// Lexically normalizes a path: drops `.` components and pops on `..`.
///
/// `..` at the filesystem root stays at the root. Symlinks are not consulted,
/// so the result may differ from a canonicalized path when links are involved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                );
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !at_root {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Joins `relative` under `base`, ignoring any root or prefix in `relative`.
///
/// Unlike [`Path::join`], an absolute `relative` never replaces `base`:
/// `/p` joined with `/etc/x` gives `/p/etc/x`. The result is normalized.
pub fn join_under(base: &Path, relative: &Path) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other),
        }
    }
    normalize_path(&joined)
}
