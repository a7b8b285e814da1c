//! Persistent key-value storage.
//!
//! The tracker persists two independent values under fixed keys. Backends
//! only need to move opaque strings; (de)serialization lives in
//! `services::storage`.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key names as constants.
pub mod keys {
    pub const ACTIVITIES: &str = "fittrack_activities";
    pub const GOALS: &str = "fittrack_goals";
}

/// Minimal string key-value store.
pub trait KeyValueStore: Send {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Errors from storage backends and snapshot handling.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Value for '{key}' is {size} bytes, exceeding the {limit} byte quota")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("Failed to serialize '{key}': {message}")]
    Serialize { key: String, message: String },

    #[error("Failed to parse '{key}': {message}")]
    Parse { key: String, message: String },

    #[error("Unsupported schema version {found} for '{key}' (newest known is {supported})")]
    UnsupportedVersion {
        key: String,
        found: u64,
        supported: u64,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Reject a value larger than `limit` bytes (`0` disables the check).
pub(crate) fn check_quota(key: &str, value: &str, limit: usize) -> Result<(), StorageError> {
    if limit > 0 && value.len() > limit {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        });
    }
    Ok(())
}
