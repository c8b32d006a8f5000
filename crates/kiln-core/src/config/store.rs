//! Key/value configuration store persisted as a JSON document
//!
//! Each generated project keeps one document (e.g. `.kiln.json`) holding
//! generator settings and the module registry. Values are opaque JSON; the
//! store never writes to disk on mutation - `save` is the only write path.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write config to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Config at {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Capability interface the registry and orchestrator use to read and
/// write configuration values
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<&Value>;
    fn set(&mut self, key: &str, value: Value);
}

/// JSON-document-backed config store
#[derive(Debug, Default)]
pub struct JsonConfigStore {
    values: BTreeMap<String, Value>,
}

impl JsonConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON document; a missing file is an empty store
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let values = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { values })
    }

    /// Write the whole document back to disk, pretty-printed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(&self.values)
            .expect("BTreeMap of JSON values always serializes");
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_returns_what_set_stored() {
        let mut store = JsonConfigStore::new();
        store.set("projectStructure", json!("all-in-one"));

        assert_eq!(store.get("projectStructure"), Some(&json!("all-in-one")));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonConfigStore::load(&dir.path().join(".kiln.json")).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".kiln.json");

        let mut store = JsonConfigStore::new();
        store.set("groupId", json!("com.example"));
        store.set("modules", json!([{"artifactId": "demo-repo"}]));
        store.save(&path).unwrap();

        let reloaded = JsonConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.get("groupId"), Some(&json!("com.example")));
        assert_eq!(
            reloaded.get("modules"),
            Some(&json!([{"artifactId": "demo-repo"}]))
        );
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".kiln.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonConfigStore::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
