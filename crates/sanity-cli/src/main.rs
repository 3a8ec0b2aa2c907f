// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sanity-resolve - inspect how a Sanity project's plugins resolve.
//!
//! This is the binary entry point. Results go to stdout as JSON; logs and
//! diagnostics go to stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sanity_config::{LogFormat, LoggingConfig, SanityConfig};

use crate::commands::CliError;

/// sanity-resolve - resolve a Sanity project's plugin tree and roles.
#[derive(Parser, Debug)]
#[command(name = "sanity-resolve", version, about, long_about = None)]
struct Cli {
    /// Project root containing `sanity.json` (overrides `resolver.base_path`).
    #[arg(long, global = true, value_name = "DIR")]
    base_path: Option<PathBuf>,

    /// Read configuration from this file instead of the default hierarchy.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON on a single line.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Print the flattened plugin list.
    Plugins,
    /// Print the nested plugin tree.
    Tree,
    /// Print the provided and fulfilled role maps.
    Roles,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            sanity_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    let base_path = cli.base_path.clone().or(config.resolver.base_path);
    match commands::run(cli.command, base_path, cli.compact).await {
        Ok(output) => println!("{output}"),
        Err(CliError::Config(errors)) => {
            sanity_config::render_errors(&errors);
            std::process::exit(1);
        }
        Err(err) => {
            tracing::error!(error = %err, "resolution failed");
            eprintln!("sanity-resolve: {err}");
            std::process::exit(1);
        }
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<SanityConfig, Vec<sanity_config::ConfigError>> {
    match path {
        Some(path) => sanity_config::load_and_validate_path(path),
        None => sanity_config::load_and_validate(),
    }
}

/// Initialize the tracing subscriber on stderr so stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sanity={},warn", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
