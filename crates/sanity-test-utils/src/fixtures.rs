// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical project layouts shared by resolver tests.
//!
//! Each function returns the entries for a [`Fixture`](crate::Fixture);
//! pass them to [`Fixture::from_entries`](crate::Fixture::from_entries).

use serde_json::{Value, json};

use crate::FixtureEntry;

/// A file entry.
pub fn file(path: impl Into<String>, contents: impl Into<String>) -> FixtureEntry {
    FixtureEntry::File {
        path: path.into(),
        contents: contents.into(),
    }
}

/// An empty directory entry.
pub fn dir(path: impl Into<String>) -> FixtureEntry {
    FixtureEntry::Dir { path: path.into() }
}

/// A `sanity.json` entry at `dir` (empty string for the project root).
pub fn manifest(dir: &str, manifest: Value) -> FixtureEntry {
    let path = if dir.is_empty() {
        "sanity.json".to_string()
    } else {
        format!("{dir}/sanity.json")
    };
    file(path, manifest.to_string())
}

/// A project manifest declaring `plugins`, with an unrelated `server` section.
pub fn project_manifest(plugins: &[&str]) -> FixtureEntry {
    manifest(
        "",
        json!({
            "server": { "port": 7777 },
            "plugins": plugins,
        }),
    )
}

/// Core, standard layout and an Instagram plugin wired together through roles.
pub fn basic_tree() -> Vec<FixtureEntry> {
    vec![
        project_manifest(&["@sanity/core", "instagram"]),
        manifest(
            "node_modules/sanity-plugin-instagram",
            json!({
                "provides": [
                    {
                        "role": "instagram/commentsListComponent",
                        "path": "./src/components/CommentsList"
                    },
                    {
                        "role": "instagram/commentComponent",
                        "path": "./src/components/Comment"
                    }
                ],
                "fulfills": [
                    { "role": "standard-layout/tool", "path": "./src/components/InstagramTool" },
                    { "role": "standard-layout/tool", "path": "./src/components/InstaDiscoverTool" }
                ]
            }),
        ),
        manifest(
            "node_modules/@sanity/core",
            json!({
                "plugins": ["@sanity/standard-layout"],
                "provides": [{ "role": "core/mainComponent" }]
            }),
        ),
        manifest(
            "node_modules/@sanity/standard-layout",
            json!({
                "provides": [
                    { "role": "standard-layout/tool", "multiple": true },
                    { "role": "standard-layout/settings-pane", "multiple": true }
                ],
                "fulfills": [
                    { "role": "core/mainComponent", "path": "./src/components/Main" }
                ]
            }),
        ),
    ]
}

/// Knobs for [`deep_tree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepTreeOptions {
    /// Declare a root plugin that is installed nowhere.
    pub missing_plugin: bool,
    /// Leave the innermost plugin's directory without a manifest.
    pub missing_manifest: bool,
}

/// A three-level chain `foo -> bar -> baz` next to `@sanity/core`.
///
/// `bar` provides `bar/baz` and `foo` fulfills it.
pub fn deep_tree(options: DeepTreeOptions) -> Vec<FixtureEntry> {
    let mut root_plugins = vec!["@sanity/core", "foo"];
    if options.missing_plugin {
        root_plugins.push("missing");
    }

    let mut entries = vec![
        project_manifest(&root_plugins),
        manifest("node_modules/@sanity/core", json!({})),
        manifest(
            "node_modules/sanity-plugin-foo",
            json!({
                "plugins": ["bar"],
                "fulfills": [{ "role": "bar/baz", "path": "./someFile" }]
            }),
        ),
        manifest(
            "node_modules/sanity-plugin-bar",
            json!({
                "plugins": ["baz"],
                "provides": [{ "role": "bar/baz" }]
            }),
        ),
    ];

    if options.missing_manifest {
        entries.push(dir("node_modules/sanity-plugin-baz"));
    } else {
        entries.push(manifest(
            "node_modules/sanity-plugin-baz",
            json!({ "provides": [] }),
        ));
    }
    entries
}

/// Where [`resolution_order`] installs the highest-priority copy of `bar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// `plugins/sanity-plugin-bar`
    FullLocalPath,
    /// `plugins/bar`
    ShortLocalPath,
    /// `node_modules/sanity-plugin-foo/node_modules/sanity-plugin-bar`
    SubNodeModules,
    /// `node_modules/sanity-plugin-bar`
    NodeModules,
}

impl Location {
    /// All locations, highest priority first.
    pub const ALL: [Location; 4] = [
        Location::FullLocalPath,
        Location::ShortLocalPath,
        Location::SubNodeModules,
        Location::NodeModules,
    ];

    /// Directory of `bar` for this location, relative to the project root.
    pub fn relative_dir(self) -> &'static str {
        match self {
            Location::FullLocalPath => "plugins/sanity-plugin-bar",
            Location::ShortLocalPath => "plugins/bar",
            Location::SubNodeModules => {
                "node_modules/sanity-plugin-foo/node_modules/sanity-plugin-bar"
            }
            Location::NodeModules => "node_modules/sanity-plugin-bar",
        }
    }
}

/// Root declares `foo`, and `foo` declares `bar`.
///
/// `bar` is installed at `location` and at every lower-priority location, so
/// the resolver must pick `location`.
pub fn resolution_order(location: Location) -> Vec<FixtureEntry> {
    let mut entries = vec![
        project_manifest(&["foo"]),
        manifest(
            "node_modules/sanity-plugin-foo",
            json!({ "plugins": ["bar"] }),
        ),
    ];
    entries.extend(
        Location::ALL
            .into_iter()
            .skip_while(|candidate| *candidate != location)
            .map(|candidate| manifest(candidate.relative_dir(), json!({}))),
    );
    entries
}

/// Syntactically broken JSON, either in the project manifest or in a plugin's.
pub fn invalid_json(at_root: bool) -> Vec<FixtureEntry> {
    if at_root {
        return vec![file("sanity.json", "{foo:bar")];
    }
    vec![
        project_manifest(&["instagram"]),
        file("node_modules/sanity-plugin-instagram/sanity.json", r#"{"invalid""#),
    ]
}

/// Well-formed JSON with the wrong shape, either at the root or in a plugin.
pub fn invalid_manifest(at_root: bool) -> Vec<FixtureEntry> {
    if at_root {
        return vec![manifest("", json!({ "plugins": "foo" }))];
    }
    vec![
        project_manifest(&["instagram"]),
        manifest(
            "node_modules/sanity-plugin-instagram",
            json!({ "provides": { "role": "instagram/comment" } }),
        ),
    ]
}

/// Two plugins providing `layout/tool`, one single and one multiple.
pub fn role_conflict() -> Vec<FixtureEntry> {
    vec![
        project_manifest(&["layout", "rogue"]),
        manifest(
            "node_modules/sanity-plugin-layout",
            json!({ "provides": [{ "role": "layout/tool", "multiple": true }] }),
        ),
        manifest(
            "plugins/rogue",
            json!({ "provides": [{ "role": "layout/tool" }] }),
        ),
    ]
}

/// `core` with a nested `layout`, plus a local `gallery` filling layout's tool slot twice.
pub fn end_to_end() -> Vec<FixtureEntry> {
    vec![
        project_manifest(&["core", "gallery"]),
        manifest(
            "node_modules/sanity-plugin-core",
            json!({
                "plugins": ["layout"],
                "provides": [{ "role": "core/main" }]
            }),
        ),
        manifest(
            "node_modules/sanity-plugin-core/node_modules/sanity-plugin-layout",
            json!({
                "provides": [{ "role": "layout/tool", "multiple": true }],
                "fulfills": [{ "role": "core/main", "path": "./Main" }]
            }),
        ),
        manifest(
            "plugins/gallery",
            json!({
                "fulfills": [
                    { "role": "layout/tool", "path": "./ToolA" },
                    { "role": "layout/tool", "path": "./ToolB" }
                ]
            }),
        ),
    ]
}
