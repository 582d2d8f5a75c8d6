//! Ordered JSON manifest reading and serialization.

use std::fs;
use std::path::Path;

use crate::error::ContextError;

/// A package manifest: an ordered mapping of top-level keys to JSON values.
///
/// Key order follows the underlying file (`serde_json` is built with
/// `preserve_order`), which is what the order rule inspects.
pub type Manifest = serde_json::Map<String, serde_json::Value>;

/// Reads and parses a manifest file, preserving key order.
pub fn read_json(path: &Path) -> Result<Manifest, ContextError> {
    let text = fs::read_to_string(path).map_err(|source| ContextError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ContextError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(ContextError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Serializes a manifest as pretty-printed JSON with a trailing newline.
///
/// This is the on-disk form written by fixes that rewrite a manifest.
pub fn to_json_string(manifest: &Manifest) -> String {
    let mut text = serde_json::to_string_pretty(manifest)
        .expect("manifest serialization should not fail");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_json_preserves_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();

        let manifest = read_json(&path).unwrap();
        let keys: Vec<&String> = manifest.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_read_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, ContextError::Read { .. }));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, ContextError::Parse { .. }));
    }

    #[test]
    fn test_read_json_rejects_non_object_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, ContextError::NotAnObject { .. }));
    }

    #[test]
    fn test_to_json_string_is_pretty_with_trailing_newline() {
        let mut manifest = Manifest::new();
        manifest.insert("name".to_string(), serde_json::json!("pkg"));
        manifest.insert("version".to_string(), serde_json::json!("1.0.0"));

        let text = to_json_string(&manifest);
        assert_eq!(text, "{\n  \"name\": \"pkg\",\n  \"version\": \"1.0.0\"\n}\n");
    }

    #[test]
    fn test_to_json_string_keeps_insertion_order() {
        let mut manifest = Manifest::new();
        manifest.insert("version".to_string(), serde_json::json!("1.0.0"));
        manifest.insert("name".to_string(), serde_json::json!("pkg"));

        let text = to_json_string(&manifest);
        let version_at = text.find("version").unwrap();
        let name_at = text.find("name").unwrap();
        assert!(version_at < name_at, "serialized keys should follow insertion order");
    }
}
