// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand execution and JSON rendering.

use std::path::PathBuf;

use sanity_config::ConfigError;
use sanity_core::ResolveError;
use sanity_resolver::{ResolveOptions, resolve_plugin_tree, resolve_roles, resolve_tree};
use serde::Serialize;
use tracing::debug;

use crate::Commands;

/// Errors surfaced by a subcommand.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration is incomplete.
    #[error("invalid configuration")]
    Config(Vec<ConfigError>),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Run `command` against the project at `base_path` and render the result as JSON.
pub async fn run(
    command: Commands,
    base_path: Option<PathBuf>,
    compact: bool,
) -> Result<String, CliError> {
    let base_path = base_path.ok_or_else(|| {
        CliError::Config(vec![ConfigError::Validation {
            message: "no project root given: pass --base-path or set resolver.base_path"
                .to_string(),
        }])
    })?;
    let options = ResolveOptions::new(base_path);
    debug!(?command, base_path = %options.base_path.display(), "running command");

    match command {
        Commands::Plugins => render(&resolve_tree(&options).await?, compact),
        Commands::Tree => render(&resolve_plugin_tree(&options).await?, compact),
        Commands::Roles => render(&resolve_roles(&options).await?, compact),
    }
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, CliError> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
