// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed key-value store.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go through a sibling
//! temp file and a rename so a crash mid-write leaves the previous value
//! intact.

use crate::db::{check_quota, KeyValueStore, StorageError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: usize,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// `quota_bytes` caps the size of a single value; `0` disables the cap.
    pub fn open<P: AsRef<Path>>(dir: P, quota_bytes: usize) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;

        tracing::info!(dir = %dir.display(), quota_bytes, "Opened file store");
        Ok(Self { dir, quota_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(key, value, self.quota_bytes)?;
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StorageError::Io {
                key: key.to_string(),
                source,
            }
        })?;

        tracing::debug!(key, bytes = value.len(), "Wrote value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
