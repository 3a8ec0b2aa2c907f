// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the hierarchy `./sanity-resolve.toml` > `~/.config/sanity/sanity-resolve.toml`
//! with environment variable overrides via the `SANITY_RESOLVE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SanityConfig;

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "sanity-resolve.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "SANITY_RESOLVE_";

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `~/.config/sanity/sanity-resolve.toml` (user config)
/// 3. `./sanity-resolve.toml` (local directory)
/// 4. `SANITY_RESOLVE_*` environment variables
pub fn load_config() -> Result<SanityConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SanityConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SanityConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SanityConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SanityConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SanityConfig::default()))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// `~/.config/sanity/sanity-resolve.toml`, when the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sanity").join(CONFIG_FILE_NAME))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SANITY_RESOLVE_RESOLVER_BASE_PATH` must map to
/// `resolver.base_path`, not `resolver.base.path`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| env_key_to_path(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
fn env_key_to_path(key: &str) -> String {
    key.replacen("resolver_", "resolver.", 1)
        .replacen("logging_", "logging.", 1)
}
