// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `sanity-resolve` binary.

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use sanity_test_utils::{Fixture, fixtures};
use tempfile::TempDir;

/// Command with an empty config file, so user and local config files never leak in.
fn sanity_cmd(config_dir: &TempDir) -> Command {
    let config = config_dir.path().join("sanity-resolve.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = cargo_bin_cmd!("sanity-resolve");
    cmd.arg("--config").arg(config).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    sanity_cmd(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plugins"))
        .stdout(predicate::str::contains("roles"));
}

#[test]
fn test_plugins_prints_flattened_json() {
    let config = TempDir::new().unwrap();
    let fixture = Fixture::from_entries(fixtures::basic_tree()).unwrap();
    let output = sanity_cmd(&config)
        .arg("plugins")
        .arg("--compact")
        .arg("--base-path")
        .arg(fixture.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let plugins: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = plugins
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["@sanity/core", "@sanity/standard-layout", "instagram"]
    );
}

#[test]
fn test_base_path_from_config_file() {
    let fixture = Fixture::from_entries(fixtures::deep_tree(Default::default())).unwrap();
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("custom.toml");
    std::fs::write(
        &config,
        format!(
            "[resolver]\nbase_path = {:?}\n",
            fixture.path().display().to_string()
        ),
    )
    .unwrap();

    cargo_bin_cmd!("sanity-resolve")
        .arg("--config")
        .arg(&config)
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("bar/baz"));
}

#[test]
fn test_missing_base_path_fails() {
    let config = TempDir::new().unwrap();
    sanity_cmd(&config)
        .arg("tree")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--base-path"));
}

#[test]
fn test_plugin_not_found_reports_locations() {
    let config = TempDir::new().unwrap();
    let fixture = Fixture::from_entries(fixtures::deep_tree(fixtures::DeepTreeOptions {
        missing_plugin: true,
        ..Default::default()
    }))
    .unwrap();
    sanity_cmd(&config)
        .arg("plugins")
        .arg("--base-path")
        .arg(fixture.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("plugin \"missing\" not found"))
        .stderr(predicate::str::contains("Locations tried"));
}

#[test]
fn test_invalid_config_is_rendered() {
    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("bad.toml");
    std::fs::write(&config, "[logging]\nlevl = \"debug\"\n").unwrap();

    cargo_bin_cmd!("sanity-resolve")
        .arg("--config")
        .arg(&config)
        .arg("plugins")
        .assert()
        .failure()
        .stderr(predicate::str::contains("levl"));
}
