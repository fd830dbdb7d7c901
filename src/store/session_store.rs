//! SessionStore implementation
//!
//! HashMap index behind a re-entrant mutex, mirrored write-through into an
//! optional persistence backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::{Result, SessionError};
use crate::id::IdGenerator;
use crate::persistence::Persistence;
use crate::record::{Payload, Record};

use super::rehydrate::{rehydrate, RehydrationReport};
use super::StoreBuilder;

type Index = HashMap<String, Record>;

/// Thread-safe store of expiring sessions
///
/// ## Concurrency:
/// - `index`: `ReentrantMutex<RefCell<..>>`, held for the whole of every
///   public method (persistence I/O included)
/// - `RefCell` borrows are never held across a call back into the store
/// - All methods use `&self`; share the store with `Arc<SessionStore>`
pub struct SessionStore {
    /// Store configuration
    config: Config,

    /// Session id → record. The source of truth while the process runs.
    index: ReentrantMutex<RefCell<Index>>,

    /// Durable mirror of `index`, if configured
    persistence: Option<Arc<dyn Persistence>>,

    /// Time source for creation, touch and expiry
    clock: Arc<dyn Clock>,

    /// Source of fresh session ids
    ids: Arc<dyn IdGenerator>,

    /// Outcome of rehydration at construction
    report: RehydrationReport,
}

impl SessionStore {
    /// Open a store with the given config (wall clock, UUID ids)
    pub fn open(config: Config) -> Result<Self> {
        Self::builder(config).open()
    }

    /// Open a file-backed store in `path` with default settings
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Start building a store with custom collaborators
    pub fn builder(config: Config) -> StoreBuilder {
        StoreBuilder::new(config)
    }

    pub(crate) fn from_parts(
        config: Config,
        persistence: Option<Arc<dyn Persistence>>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        let (index, report) = match &persistence {
            Some(backend) => rehydrate(backend.as_ref(), clock.now())?,
            None => (Index::new(), RehydrationReport::default()),
        };

        Ok(Self {
            config,
            index: ReentrantMutex::new(RefCell::new(index)),
            persistence,
            clock,
            ids,
            report,
        })
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Create a session for `owner` and return its id.
    ///
    /// `payload` defaults to empty, `ttl_secs` to the configured default.
    /// A zero or negative TTL creates a session that is already (or about
    /// to be) expired.
    pub fn create(&self, owner: &str, payload: Option<Payload>, ttl_secs: Option<i64>) -> Result<String> {
        if owner.is_empty() {
            return Err(SessionError::InvalidOwner);
        }

        let ttl = ttl_secs.unwrap_or(self.config.default_ttl_secs);

        let guard = self.index.lock();

        let id = self.ids.generate();
        debug_assert!(!guard.borrow().contains_key(&id), "id generator repeated {}", id);

        let record = Record::new(id.clone(), owner, payload.unwrap_or_default(), self.clock.now(), ttl)?;

        self.mirror(&record)?;
        guard.borrow_mut().insert(id.clone(), record);

        debug!(session_id = %id, owner = %owner, ttl_secs = ttl, "Session created");
        Ok(id)
    }

    /// Look up a live session, recording the access.
    ///
    /// An expired session is deleted (index and backend) and reported as
    /// absent. A live one is touched and re-mirrored so `last_accessed`
    /// survives a restart. The returned record is a snapshot; changing it
    /// does not change the store.
    pub fn get(&self, id: &str) -> Result<Option<Record>> {
        let guard = self.index.lock();
        let now = self.clock.now();

        let current = guard.borrow().get(id).cloned();
        let Some(mut record) = current else {
            return Ok(None);
        };

        if record.is_expired(now) {
            self.delete(id)?;
            debug!(session_id = %id, "Session expired, evicted on read");
            return Ok(None);
        }

        record.touch(now);
        self.mirror(&record)?;
        guard.borrow_mut().insert(id.to_string(), record.clone());

        Ok(Some(record))
    }

    /// Read a live session without touching it.
    ///
    /// Expired sessions read as absent but are left for `get` or
    /// `sweep_expired` to evict.
    pub fn peek(&self, id: &str) -> Option<Record> {
        let guard = self.index.lock();
        let now = self.clock.now();

        let index = guard.borrow();
        index.get(id).filter(|r| !r.is_expired(now)).cloned()
    }

    /// Change a session's payload.
    ///
    /// With `merge`, `patch` is combined key by key (patch wins); without
    /// it the payload is replaced. Returns `false` if the session does not
    /// exist or has expired (and was evicted by the lookup).
    pub fn update(&self, id: &str, patch: Payload, merge: bool) -> Result<bool> {
        let guard = self.index.lock();

        let Some(mut record) = self.get(id)? else {
            return Ok(false);
        };

        if merge {
            record.merge_payload(patch);
        } else {
            record.replace_payload(patch);
        }
        record.touch(self.clock.now());

        self.mirror(&record)?;
        guard.borrow_mut().insert(id.to_string(), record);

        debug!(session_id = %id, merge, "Session updated");
        Ok(true)
    }

    /// Remove a session. Returns whether it was present.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let guard = self.index.lock();

        if !guard.borrow().contains_key(id) {
            return Ok(false);
        }

        self.unmirror(id)?;
        guard.borrow_mut().remove(id);

        debug!(session_id = %id, "Session deleted");
        Ok(true)
    }

    /// Live sessions belonging to `owner`, oldest first.
    ///
    /// Read-only: nothing is touched, and expired sessions are skipped
    /// without being evicted.
    pub fn list_by_owner(&self, owner: &str) -> Vec<Record> {
        let guard = self.index.lock();
        let now = self.clock.now();

        let mut sessions: Vec<Record> = guard
            .borrow()
            .values()
            .filter(|r| r.owner() == owner && !r.is_expired(now))
            .cloned()
            .collect();

        sessions.sort_by(|a, b| a.created_at().cmp(&b.created_at()).then_with(|| a.id().cmp(b.id())));
        sessions
    }

    /// Delete every session that is expired now. Returns how many.
    ///
    /// Goes through `delete`, so the backend stays in step. If the backend
    /// fails part way, sessions already removed stay removed and the error
    /// is returned.
    pub fn sweep_expired(&self) -> Result<usize> {
        let guard = self.index.lock();
        let now = self.clock.now();

        let expired: Vec<String> = guard
            .borrow()
            .values()
            .filter(|r| r.is_expired(now))
            .map(|r| r.id().to_string())
            .collect();

        let mut removed = 0;
        for id in &expired {
            if self.delete(id)? {
                removed += 1;
            }
        }

        if removed > 0 {
            info!(removed, remaining = guard.borrow().len(), "Swept expired sessions");
        }
        Ok(removed)
    }

    /// Raw number of sessions in the index.
    ///
    /// NOT expiry-filtered: sessions that have expired but have not yet
    /// been evicted by `get` or `sweep_expired` are still counted. Use
    /// [`live_count`](Self::live_count) for the expiry-aware figure.
    pub fn count(&self) -> usize {
        let guard = self.index.lock();
        let len = guard.borrow().len();
        len
    }

    /// Number of sessions that are not expired now
    pub fn live_count(&self) -> usize {
        let guard = self.index.lock();
        let now = self.clock.now();
        let live = guard.borrow().values().filter(|r| !r.is_expired(now)).count();
        live
    }

    /// Ids of every session in the index (raw, like `count`), sorted
    pub fn ids(&self) -> Vec<String> {
        let guard = self.index.lock();
        let mut ids: Vec<String> = guard.borrow().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Delete every session, backend included
    pub fn clear(&self) -> Result<()> {
        let guard = self.index.lock();

        let ids: Vec<String> = guard.borrow().keys().cloned().collect();
        for id in &ids {
            self.delete(id)?;
        }

        debug!(cleared = ids.len(), "Session store cleared");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lifetime applied when `create` is not given one
    pub fn default_ttl_secs(&self) -> i64 {
        self.config.default_ttl_secs
    }

    /// Whether sessions are mirrored to a backend
    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    /// What rehydration found when the store was opened
    pub fn rehydration_report(&self) -> RehydrationReport {
        self.report
    }

    // =========================================================================
    // Private Helpers (called with the lock held)
    // =========================================================================

    fn mirror(&self, record: &Record) -> Result<()> {
        match &self.persistence {
            Some(backend) => backend.put(record.id(), record.to_bytes()?),
            None => Ok(()),
        }
    }

    fn unmirror(&self, id: &str) -> Result<()> {
        match &self.persistence {
            Some(backend) => backend.delete(id),
            None => Ok(()),
        }
    }
}
