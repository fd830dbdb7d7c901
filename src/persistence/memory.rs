//! In-memory backend

use std::collections::HashMap;
use std::io;

use bytes::Bytes;
use parking_lot::RwLock;

use super::Persistence;
use crate::error::{PersistenceOp, Result, SessionError};

/// Process-local key → blob map
///
/// Nothing survives the process, but a store rebuilt on the same backend
/// (via `Arc`) goes through the full rehydration path.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.read().contains_key(key)
    }
}

impl Persistence for MemoryBackend {
    fn put(&self, key: &str, blob: Bytes) -> Result<()> {
        self.blobs.write().insert(key.to_string(), blob);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.blobs.write().remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.blobs.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Bytes> {
        self.blobs.read().get(key).cloned().ok_or_else(|| {
            SessionError::persistence(
                PersistenceOp::Get,
                key,
                io::Error::new(io::ErrorKind::NotFound, "no such key"),
            )
        })
    }
}
