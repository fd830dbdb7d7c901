//! Persistence Module
//!
//! Durable key → blob storage that mirrors the session index.
//!
//! ## Responsibilities
//! - Overwrite-or-create a blob per key, durable on return
//! - Idempotent deletes
//! - Key enumeration and reads (rehydration only)
//!
//! ## Backends
//! - [`FileBackend`]: one `{key}.json` file per session in a directory
//! - [`MemoryBackend`]: process-local map, for embedding and tests
//!
//! Any I/O failure is reported as `SessionError::Persistence` and is
//! surfaced to the caller of the store operation that triggered it.

mod file;
mod memory;

use bytes::Bytes;

use crate::error::Result;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Contract the store consumes from its durable mirror
pub trait Persistence: Send + Sync {
    /// Overwrite or create `key`. Durable after return.
    fn put(&self, key: &str, blob: Bytes) -> Result<()>;

    /// Remove `key`. No-op if absent.
    fn delete(&self, key: &str) -> Result<()>;

    /// Every stored key
    fn list_keys(&self) -> Result<Vec<String>>;

    /// Read the blob stored under `key`
    fn get(&self, key: &str) -> Result<Bytes>;
}
