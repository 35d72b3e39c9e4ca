//! File-backed storage backend.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::{Storage, StorageError};

/// Storage persisted as a single JSON object of key → value.
///
/// The document is read once when opened and rewritten in full (via a
/// temporary file and rename) on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read, or
    /// `StorageError::Corrupt` if it is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Storage file not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `items` to disk, replacing the previous document.
    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        Ok(())
    }

    /// Apply `change` to a copy of the contents and commit it only if the
    /// write succeeds.
    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        let mut next = items.clone();
        change(&mut next);
        self.flush(&next)?;
        *items = next;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.remove(key);
        })
    }
}
