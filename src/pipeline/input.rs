//! Input resolution: validate and load the dataset JSON.
//!
//! The leading-byte check exists for the same reason the magic-byte check on
//! any binary format does: serde's "expected value at line 1 column 1" tells
//! a user nothing, while "not a JSON array" names the actual mistake
//! (pointing the converter at a JSONL file or a single object is common).

use crate::dataset::Item;
use crate::error::Mcq2TsvError;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load the dataset file into items, validating existence, readability, and
/// top-level shape.
pub fn load_items(path: &Path) -> Result<Vec<Item>, Mcq2TsvError> {
    if !path.exists() {
        return Err(Mcq2TsvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Mcq2TsvError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Mcq2TsvError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let mut raw = String::new();
    file.read_to_string(&mut raw)
        .map_err(|e| Mcq2TsvError::InvalidJson {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    // Top-level shape guard before handing off to serde.
    match raw.trim_start().chars().next() {
        Some('[') => {}
        first => {
            return Err(Mcq2TsvError::NotAJsonArray {
                path: path.to_path_buf(),
                first: first.unwrap_or('\0'),
            });
        }
    }

    let items: Vec<Item> =
        serde_json::from_str(&raw).map_err(|e| Mcq2TsvError::InvalidJson {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    debug!("loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("data.json");
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn loads_a_minimal_array() {
        let dir = TempDir::new().unwrap();
        let path = write_dataset(&dir, r#"[{"answer": "A", "A": "cat"}]"#);
        let items = load_items(&path).expect("load");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer.as_deref(), Some("A"));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_items(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Mcq2TsvError::FileNotFound { .. }));
    }

    #[test]
    fn top_level_object_is_rejected_with_shape_error() {
        let dir = TempDir::new().unwrap();
        let path = write_dataset(&dir, r#"{"messages": []}"#);
        let err = load_items(&path).unwrap_err();
        assert!(matches!(err, Mcq2TsvError::NotAJsonArray { first: '{', .. }));
    }

    #[test]
    fn truncated_array_is_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_dataset(&dir, r#"[{"answer": "A""#);
        let err = load_items(&path).unwrap_err();
        assert!(matches!(err, Mcq2TsvError::InvalidJson { .. }));
    }

    #[test]
    fn empty_array_is_a_valid_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_dataset(&dir, "  [] ");
        assert!(load_items(&path).expect("load").is_empty());
    }
}
