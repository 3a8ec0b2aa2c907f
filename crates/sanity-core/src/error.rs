// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for plugin resolution.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Whose manifest was being read when an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOwner {
    /// The project manifest at the resolution base path.
    Root,
    /// A named plugin's manifest.
    Plugin(String),
}

impl ManifestOwner {
    /// Plugin name, or `None` for the project root.
    pub fn plugin_name(&self) -> Option<&str> {
        match self {
            ManifestOwner::Root => None,
            ManifestOwner::Plugin(name) => Some(name),
        }
    }
}

impl fmt::Display for ManifestOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestOwner::Root => write!(f, "project root"),
            ManifestOwner::Plugin(name) => write!(f, "plugin \"{name}\""),
        }
    }
}

/// One side of a role conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictParty {
    pub plugin_name: String,
    pub install_path: PathBuf,
    pub multiple: bool,
}

impl fmt::Display for ConflictParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = if self.multiple { "multiple" } else { "single" };
        write!(
            f,
            "\"{}\" ({}, {shape})",
            self.plugin_name,
            self.install_path.display()
        )
    }
}

/// The error type for every resolution operation.
///
/// All variants are terminal: a failed resolution never yields a partial tree
/// or a partial role map.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The project root could not be made absolute.
    #[error("cannot resolve project root {}: {source}", .path.display())]
    BasePath {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No `sanity.json` where one was expected.
    #[error("{}", not_found_message(.owner, .path))]
    ManifestNotFound { owner: ManifestOwner, path: PathBuf },

    /// The manifest exists but could not be read.
    #[error("failed to read manifest for {owner} at {}: {source}", .path.display())]
    ManifestRead {
        owner: ManifestOwner,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("malformed manifest for {owner} at {}: {source}", .path.display())]
    ManifestParse {
        owner: ManifestOwner,
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The manifest is valid JSON but does not match the manifest schema.
    #[error("error while reading {owner} manifest: `{field}` {message}")]
    ManifestValidation {
        owner: ManifestOwner,
        /// Dotted path to the offending field (e.g. `provides.0.role`).
        field: String,
        message: String,
    },

    /// None of the candidate locations for a plugin exist.
    #[error("{}", plugin_not_found_message(.name, .tried))]
    PluginNotFound {
        name: String,
        /// Every location probed, in priority order.
        tried: Vec<PathBuf>,
    },

    /// Two plugins provide the same role with different multiplicity.
    #[error(
        "plugins {existing} and {incoming} both provide \"{role}\", \
         but expect different shapes (single vs multiple fulfillers)"
    )]
    RoleConflict {
        role: String,
        /// The provider already registered (later in flatten order).
        existing: ConflictParty,
        /// The provider that disagreed with it.
        incoming: ConflictParty,
    },
}

impl ResolveError {
    /// The owner of the manifest involved, for manifest-related errors.
    pub fn manifest_owner(&self) -> Option<&ManifestOwner> {
        match self {
            ResolveError::ManifestNotFound { owner, .. }
            | ResolveError::ManifestRead { owner, .. }
            | ResolveError::ManifestParse { owner, .. }
            | ResolveError::ManifestValidation { owner, .. } => Some(owner),
            ResolveError::BasePath { .. }
            | ResolveError::PluginNotFound { .. }
            | ResolveError::RoleConflict { .. } => None,
        }
    }
}

fn not_found_message(owner: &ManifestOwner, path: &std::path::Path) -> String {
    match owner {
        ManifestOwner::Root => format!(
            "no \"sanity.json\" found at project root ({})",
            path.display()
        ),
        ManifestOwner::Plugin(name) => {
            format!("no \"sanity.json\" file found in plugin \"{name}\"")
        }
    }
}

fn plugin_not_found_message(name: &str, tried: &[PathBuf]) -> String {
    let locations = tried
        .iter()
        .map(|p| format!("  * {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("plugin \"{name}\" not found.\nLocations tried:\n{locations}")
}

/// Result alias used throughout the resolver.
pub type Result<T> = std::result::Result<T, ResolveError>;
