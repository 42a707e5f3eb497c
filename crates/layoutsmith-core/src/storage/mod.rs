//! Storage abstraction for persistence.
//!
//! Backends are plain string key-value stores. The editor writes its whole
//! snapshot as JSON under a single key.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutoSaver, load_state, snapshot};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Key the editor snapshot is stored under.
pub const STORAGE_KEY: &str = "visual-editor-state";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key-value storage backends.
///
/// Implementations must be shareable with the background writer thread.
pub trait Storage: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// All stored keys.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
