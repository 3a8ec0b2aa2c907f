// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest reading and validation for `sanity.json` files.
//!
//! A manifest is parsed in two steps: the raw bytes become a JSON value, the
//! value is checked against the manifest shape (so errors can name the exact
//! field), and only then is it deserialized into a [`Manifest`].

use std::io;
use std::path::Path;

use sanity_core::{Manifest, ManifestOwner, ResolveError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// File name of the manifest expected in the project root and every plugin directory.
pub const MANIFEST_FILE_NAME: &str = "sanity.json";

/// Field path reported when the document itself has the wrong shape.
const DOCUMENT_FIELD: &str = "<root>";

/// Reads and validates the manifest inside `manifest_dir`.
pub async fn read_manifest(manifest_dir: &Path, owner: &ManifestOwner) -> Result<Manifest> {
    let path = manifest_dir.join(MANIFEST_FILE_NAME);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ResolveError::ManifestNotFound {
                owner: owner.clone(),
                path,
            });
        }
        Err(source) => {
            return Err(ResolveError::ManifestRead {
                owner: owner.clone(),
                path,
                source,
            });
        }
    };

    debug!(%owner, path = %path.display(), bytes = bytes.len(), "read manifest");
    parse_manifest(&bytes, &path, owner)
}

/// Parses and validates manifest content read from `path`.
pub fn parse_manifest(content: &[u8], path: &Path, owner: &ManifestOwner) -> Result<Manifest> {
    let value: Value =
        serde_json::from_slice(content).map_err(|source| ResolveError::ManifestParse {
            owner: owner.clone(),
            path: path.to_path_buf(),
            source,
        })?;

    validate_manifest(&value, owner)?;

    serde_json::from_value(value).map_err(|e| ResolveError::ManifestValidation {
        owner: owner.clone(),
        field: DOCUMENT_FIELD.to_string(),
        message: e.to_string(),
    })
}

/// Checks a JSON document against the manifest shape.
///
/// Unknown top-level fields are accepted. Field paths in errors are dotted,
/// with array indices as segments (e.g. `fulfills.1.path`).
pub fn validate_manifest(value: &Value, owner: &ManifestOwner) -> Result<()> {
    let invalid = |field: String, message: &str| ResolveError::ManifestValidation {
        owner: owner.clone(),
        field,
        message: message.to_string(),
    };

    let document = value
        .as_object()
        .ok_or_else(|| invalid(DOCUMENT_FIELD.to_string(), "must be an object"))?;

    for (index, plugin) in array_field(document, "plugins", owner)?.iter().enumerate() {
        if !plugin.is_string() {
            return Err(invalid(format!("plugins.{index}"), "must be a plugin name string"));
        }
    }

    for (index, entry) in array_field(document, "provides", owner)?.iter().enumerate() {
        let field = format!("provides.{index}");
        let entry = entry
            .as_object()
            .ok_or_else(|| invalid(field.clone(), "must be an object"))?;
        require_string(entry, &field, "role", owner)?;
        optional_string(entry, &field, "path", owner)?;
        if let Some(multiple) = entry.get("multiple") {
            if !multiple.is_boolean() {
                return Err(invalid(format!("{field}.multiple"), "must be a boolean"));
            }
        }
    }

    for (index, entry) in array_field(document, "fulfills", owner)?.iter().enumerate() {
        let field = format!("fulfills.{index}");
        let entry = entry
            .as_object()
            .ok_or_else(|| invalid(field.clone(), "must be an object"))?;
        require_string(entry, &field, "role", owner)?;
        require_string(entry, &field, "path", owner)?;
    }

    Ok(())
}

/// Returns the array stored at `key`, or an empty slice when the key is absent.
fn array_field<'a>(
    document: &'a Map<String, Value>,
    key: &str,
    owner: &ManifestOwner,
) -> Result<&'a [Value]> {
    match document.get(key) {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ResolveError::ManifestValidation {
            owner: owner.clone(),
            field: key.to_string(),
            message: "must be an array".to_string(),
        }),
    }
}

fn require_string(
    entry: &Map<String, Value>,
    parent: &str,
    key: &str,
    owner: &ManifestOwner,
) -> Result<()> {
    match entry.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        Some(Value::String(_)) => Err(ResolveError::ManifestValidation {
            owner: owner.clone(),
            field: format!("{parent}.{key}"),
            message: "must not be empty".to_string(),
        }),
        Some(_) => Err(ResolveError::ManifestValidation {
            owner: owner.clone(),
            field: format!("{parent}.{key}"),
            message: "must be a string".to_string(),
        }),
        None => Err(ResolveError::ManifestValidation {
            owner: owner.clone(),
            field: format!("{parent}.{key}"),
            message: "is required".to_string(),
        }),
    }
}

fn optional_string(
    entry: &Map<String, Value>,
    parent: &str,
    key: &str,
    owner: &ManifestOwner,
) -> Result<()> {
    match entry.get(key) {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ResolveError::ManifestValidation {
            owner: owner.clone(),
            field: format!("{parent}.{key}"),
            message: "must be a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plugin(name: &str) -> ManifestOwner {
        ManifestOwner::Plugin(name.to_string())
    }

    fn validation_field(result: Result<()>) -> String {
        match result {
            Err(ResolveError::ManifestValidation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn parse_full_manifest() {
        let content = br#"{
            "server": {"port": 7777},
            "plugins": ["@sanity/standard-layout"],
            "provides": [{"role": "core/mainComponent"}],
            "fulfills": [{"role": "bar/baz", "path": "./someFile"}]
        }"#;
        let manifest =
            parse_manifest(content, Path::new("/p/sanity.json"), &ManifestOwner::Root).unwrap();
        assert_eq!(manifest.plugins, vec!["@sanity/standard-layout"]);
        assert_eq!(manifest.provides[0].role, "core/mainComponent");
        assert!(!manifest.provides[0].multiple);
        assert_eq!(manifest.fulfills[0].path, "./someFile");
        assert!(manifest.extra.contains_key("server"));
    }

    #[test]
    fn parse_empty_object_is_empty_manifest() {
        let manifest = parse_manifest(b"{}", Path::new("/p/sanity.json"), &plugin("x")).unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn malformed_json_is_parse_error_naming_owner() {
        let err = parse_manifest(b"{\"invalid\"", Path::new("/p/sanity.json"), &plugin("instagram"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::ManifestParse { .. }));
        assert!(err.to_string().contains("plugin \"instagram\""));
    }

    #[test]
    fn plugins_must_be_an_array() {
        let field = validation_field(validate_manifest(
            &json!({"plugins": "foo"}),
            &ManifestOwner::Root,
        ));
        assert_eq!(field, "plugins");
    }

    #[test]
    fn plugin_names_must_be_strings() {
        let field = validation_field(validate_manifest(
            &json!({"plugins": ["ok", 3]}),
            &ManifestOwner::Root,
        ));
        assert_eq!(field, "plugins.1");
    }

    #[test]
    fn provides_must_be_an_array_of_objects() {
        let field = validation_field(validate_manifest(
            &json!({"provides": {"role": "path"}}),
            &plugin("instagram"),
        ));
        assert_eq!(field, "provides");

        let field = validation_field(validate_manifest(
            &json!({"provides": ["core/main"]}),
            &plugin("instagram"),
        ));
        assert_eq!(field, "provides.0");
    }

    #[test]
    fn provision_requires_role() {
        let field = validation_field(validate_manifest(
            &json!({"provides": [{"role": "a"}, {"path": "./x"}]}),
            &plugin("p"),
        ));
        assert_eq!(field, "provides.1.role");
    }

    #[test]
    fn provision_multiple_must_be_boolean() {
        let field = validation_field(validate_manifest(
            &json!({"provides": [{"role": "a", "multiple": "yes"}]}),
            &plugin("p"),
        ));
        assert_eq!(field, "provides.0.multiple");
    }

    #[test]
    fn fulfillment_requires_role_and_path() {
        let field = validation_field(validate_manifest(
            &json!({"fulfills": [{"path": "./x"}]}),
            &plugin("p"),
        ));
        assert_eq!(field, "fulfills.0.role");

        let field = validation_field(validate_manifest(
            &json!({"fulfills": [{"role": "a/b"}]}),
            &plugin("p"),
        ));
        assert_eq!(field, "fulfills.0.path");
    }

    #[test]
    fn non_object_document_is_rejected() {
        let field = validation_field(validate_manifest(&json!(["a"]), &ManifestOwner::Root));
        assert_eq!(field, DOCUMENT_FIELD);
    }

    #[tokio::test]
    async fn missing_file_is_manifest_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_manifest(dir.path(), &plugin("baz")).await.unwrap_err();
        match err {
            ResolveError::ManifestNotFound { owner, path } => {
                assert_eq!(owner, plugin("baz"));
                assert_eq!(path, dir.path().join(MANIFEST_FILE_NAME));
            }
            other => panic!("expected ManifestNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reads_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE_NAME),
            r#"{"plugins": ["core", "gallery"]}"#,
        )
        .unwrap();
        let manifest = read_manifest(dir.path(), &ManifestOwner::Root).await.unwrap();
        assert_eq!(manifest.plugins, vec!["core", "gallery"]);
    }
}
