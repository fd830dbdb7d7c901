//! File Backend
//!
//! One file per session in a single directory.
//!
//! ## Layout
//! ```text
//! {data_dir}/
//!   ├── 2f6c0e1a-….json        (live record)
//!   ├── 9b1d44c0-….json
//!   └── 9b1d44c0-….json.tmp    (in-flight write, never listed)
//! ```
//!
//! Writes go to `{key}.json.tmp` and are renamed over `{key}.json`, so a
//! crash mid-write leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::warn;

use super::Persistence;
use crate::error::{PersistenceOp, Result, SessionError};

/// Directory-backed persistence
#[derive(Debug)]
pub struct FileBackend {
    /// Directory holding the record files
    dir: PathBuf,

    /// fsync before rename
    sync_writes: bool,
}

impl FileBackend {
    const EXTENSION: &'static str = "json";
    const TMP_SUFFIX: &'static str = "tmp";

    /// Open or create a backend rooted at `path`
    pub fn open(path: &Path, sync_writes: bool) -> Result<Self> {
        fs::create_dir_all(path)
            .map_err(|e| SessionError::persistence(PersistenceOp::Open, path.display().to_string(), e))?;

        Ok(Self {
            dir: path.to_path_buf(),
            sync_writes,
        })
    }

    /// Directory holding the record files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that stores `key`
    pub fn record_path(&self, key: &str) -> Result<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, Self::EXTENSION)))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn tmp_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}.{}", key, Self::EXTENSION, Self::TMP_SUFFIX))
    }

    /// Keys become file names, so keep them to a single path component
    fn validate_key(key: &str) -> Result<()> {
        let bad = key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\', '\0'])
            || key.contains("..");

        if bad {
            return Err(SessionError::InvalidKey(key.to_string()));
        }
        Ok(())
    }

    /// "abc.json" → Some("abc"); anything else → None
    fn parse_key(path: &Path) -> Option<String> {
        let stem = Self::json_stem(path)?;
        Self::validate_key(stem).ok()?;
        Some(stem.to_string())
    }

    /// File stem of any `*.json` path, valid key or not
    fn json_stem(path: &Path) -> Option<&str> {
        if path.extension()? != Self::EXTENSION {
            return None;
        }
        path.file_stem()?.to_str()
    }

    fn write_file(&self, tmp: &Path, target: &Path, blob: &[u8]) -> io::Result<()> {
        let mut file = File::create(tmp)?;
        file.write_all(blob)?;
        if self.sync_writes {
            file.sync_all()?;
        }
        drop(file);
        fs::rename(tmp, target)
    }
}

impl Persistence for FileBackend {
    fn put(&self, key: &str, blob: Bytes) -> Result<()> {
        let target = self.record_path(key)?;
        let tmp = self.tmp_path(key);

        if let Err(e) = self.write_file(&tmp, &target, &blob) {
            let _ = fs::remove_file(&tmp);
            return Err(SessionError::persistence(PersistenceOp::Put, key, e));
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::persistence(PersistenceOp::Delete, key, e)),
        }
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        let list_err = |e| SessionError::persistence(PersistenceOp::List, self.dir.display().to_string(), e);

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(list_err)? {
            let path = entry.map_err(list_err)?.path();

            if path.is_file() {
                if let Some(key) = Self::parse_key(&path) {
                    keys.push(key);
                } else if Self::json_stem(&path).is_some() {
                    warn!(path = %path.display(), "Skipping record file whose name is not a valid key");
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.record_path(key)?;
        fs::read(&path)
            .map(Bytes::from)
            .map_err(|e| SessionError::persistence(PersistenceOp::Get, key, e))
    }
}
