// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary project directories for resolver tests.
//!
//! A `Fixture` owns a temp directory that is removed when the fixture is
//! dropped. Entry paths are relative to the project root.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A single filesystem entry to create inside a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureEntry {
    /// A file with the given contents. Parent directories are created.
    File { path: String, contents: String },
    /// An empty directory.
    Dir { path: String },
}

/// Builder for fixtures with configurable entries.
#[derive(Debug, Default)]
pub struct FixtureBuilder {
    entries: Vec<FixtureEntry>,
}

impl FixtureBuilder {
    /// Add a file.
    pub fn file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.entries.push(FixtureEntry::File {
            path: path.into(),
            contents: contents.into(),
        });
        self
    }

    /// Add an empty directory.
    pub fn dir(mut self, path: impl Into<String>) -> Self {
        self.entries.push(FixtureEntry::Dir { path: path.into() });
        self
    }

    /// Add a batch of entries.
    pub fn entries(mut self, entries: impl IntoIterator<Item = FixtureEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Create the temp directory and write every entry.
    pub fn build(self) -> io::Result<Fixture> {
        let dir = TempDir::new()?;
        for entry in &self.entries {
            match entry {
                FixtureEntry::File { path, contents } => {
                    let target = dir.path().join(path);
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&target, contents)?;
                }
                FixtureEntry::Dir { path } => {
                    std::fs::create_dir_all(dir.path().join(path))?;
                }
            }
        }
        Ok(Fixture { dir })
    }
}

/// A temporary project root.
#[derive(Debug)]
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Start building a fixture.
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }

    /// Build a fixture from a list of entries.
    pub fn from_entries(entries: impl IntoIterator<Item = FixtureEntry>) -> io::Result<Self> {
        Self::builder().entries(entries).build()
    }

    /// Absolute path of the project root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a plugin directory under `node_modules/`.
    pub fn node_module(&self, package: &str) -> PathBuf {
        self.dir.path().join("node_modules").join(package)
    }

    /// Overwrite or add a file after the fixture was built.
    pub fn write(&self, path: &str, contents: &str) -> io::Result<()> {
        let target = self.dir.path().join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, contents)
    }
}
