//! Durable key-value storage for cart snapshots.
//!
//! The [`Storage`] trait mirrors browser local storage: string keys, string
//! values, synchronous reads and writes. Two backends are provided:
//!
//! - [`FileStorage`] - a JSON document on disk, rewritten wholesale on every write
//! - [`MemoryStorage`] - process-local, for tests and ephemeral sessions

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored document could not be parsed or written.
    #[error("Corrupt storage document: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A previous writer panicked while holding the storage lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
