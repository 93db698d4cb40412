//! JSON file-based key-value backend.
//!
//! The whole store is one JSON object of string values, kept in memory and
//! rewritten on every change. Writes go to a temporary file that is renamed
//! over the target, so a crash never leaves a half-written file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "selectedBook": "[{\"title\":\"Dune\",\"key\":\"/works/OL893415W\"}]"
//! }
//! ```

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key-value store persisted to a single JSON file.
///
/// `Send` but not `Sync`; owned by the plugin's single event loop.
pub struct JsonFileStorage {
    file_path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store. So is a file that does not parse as
    /// a JSON object of strings; it is logged and replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or an
    /// existing file cannot be read.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON key-value storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let items = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no storage file yet, starting empty");
            BTreeMap::new()
        };

        tracing::debug!(item_count = items.len(), "storage opened");
        Ok(Self { file_path, items })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<String, String>> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "storage file is malformed, starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.items)
            .map_err(|e| BookshelfError::Storage(format!("failed to serialize storage: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing temporary storage file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, item_count = self.items.len(), "storage saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_item", key = %key, value_len = value.len()).entered();
        self.items.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_item", key = %key).entered();
        if self.items.remove(key).is_some() {
            self.save_to_file()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for JsonFileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStorage")
            .field("file_path", &self.file_path)
            .field("item_count", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::open(dir.path().join("nested/store.json")).unwrap();
        assert_eq!(storage.get_item("selectedBook").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut storage = JsonFileStorage::open(path.clone()).unwrap();
        storage.set_item("selectedBook", "[]").unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(path).unwrap();
        assert_eq!(reopened.get_item("selectedBook").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut storage = JsonFileStorage::open(path.clone()).unwrap();
        assert_eq!(storage.get_item("selectedBook").unwrap(), None);

        storage.set_item("selectedBook", "[]").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("selectedBook"));
    }

    #[test]
    fn remove_item_deletes_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut storage = JsonFileStorage::open(path.clone()).unwrap();
        storage.set_item("a", "1").unwrap();
        storage.remove_item("a").unwrap();
        storage.remove_item("missing").unwrap();

        let reopened = JsonFileStorage::open(path).unwrap();
        assert_eq!(reopened.get_item("a").unwrap(), None);
    }
}
