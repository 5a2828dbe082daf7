//! # Preference Storage
//!
//! Durable key/value storage for UI preferences. Only the theme keys are
//! persisted; calculator inputs never are.
//!
//! [`FileStore`] keeps a flat JSON object on disk and saves atomically:
//! the new contents go to a `.tmp` sibling which is synced and then renamed
//! over the real file, so a crash mid-save leaves the previous file intact.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::preferences::{FileStore, PreferenceStore};
//! use std::path::Path;
//!
//! let mut store = FileStore::open(Path::new("preferences.json"))?;
//! store.set("theme", "dark")?;
//! assert_eq!(store.get("theme").as_deref(), Some("dark"));
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Durable string key/value storage. A missing key is a normal state.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> CalcResult<()>;
    fn remove(&mut self, key: &str) -> CalcResult<()>;
}

/// In-memory store, used by tests and by hosts without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CalcResult<()> {
        self.values.shift_remove(key);
        Ok(())
    }
}

/// JSON file store. Every mutation is written through.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: IndexMap<String, String>,
}

impl FileStore {
    /// Load the store at `path`. A missing file yields an empty store.
    pub fn open(path: &Path) -> CalcResult<Self> {
        let values = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preference file yet");
                IndexMap::new()
            }
            Err(e) => return Err(CalcError::file_error("read", path.display().to_string(), e.to_string())),
        };
        Ok(FileStore {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> CalcResult<()> {
        let json = serde_json::to_string_pretty(&self.values).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| CalcError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.write_all(json.as_bytes()).map_err(|e| {
            CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.sync_all().map_err(|e| {
            CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("rename to final", self.path.display().to_string(), e.to_string())
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> CalcResult<()> {
        if self.values.shift_remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_prefs_path(name: &str) -> PathBuf {
        temp_dir().join(format!("universal_calc_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let path = temp_prefs_path("missing");
        let _ = fs::remove_file(&path);
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("theme"), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_prefs_path("roundtrip");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("theme", "dark").unwrap();
            store.set("themeVariant", "soft").unwrap();
        }
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
        assert_eq!(reopened.get("themeVariant").as_deref(), Some("soft"));
        assert!(!path.with_extension("json.tmp").exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let path = temp_prefs_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }
}
