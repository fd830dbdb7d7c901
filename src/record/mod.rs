//! Record Module
//!
//! One session: identity, owner, payload and three timestamps.
//!
//! ## Responsibilities
//! - Fix `expires_at` once at construction (no sliding expiration)
//! - Expiry check against a caller-supplied instant
//! - Touch-on-read bookkeeping
//! - JSON encoding for the persistence layer (see `codec`)
//!
//! ## On-disk shape
//! ```text
//! {
//!   "id": "5f0c…",
//!   "owner": "u1",
//!   "payload": { "role": "admin" },
//!   "created_at": "2026-10-19T08:00:00.123456789Z",
//!   "last_accessed": "2026-10-19T08:05:12.000000001Z",
//!   "expires_at": "2026-10-19T09:00:00.123456789Z"
//! }
//! ```

mod codec;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Open key/value payload carried by a session
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A single session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(alias = "session_id")]
    id: String,

    #[serde(alias = "user_id")]
    owner: String,

    #[serde(default, alias = "data")]
    payload: Payload,

    created_at: DateTime<Utc>,

    last_accessed: DateTime<Utc>,

    expires_at: DateTime<Utc>,
}

impl Record {
    /// Build a record created at `now` that lives for `ttl_secs`.
    ///
    /// A zero or negative TTL is accepted and yields a record that is
    /// already expired.
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        payload: Payload,
        now: DateTime<Utc>,
        ttl_secs: i64,
    ) -> Result<Self> {
        let expires_at = TimeDelta::try_seconds(ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| SessionError::Config(format!("TTL out of range: {}s", ttl_secs)))?;

        Ok(Self {
            id: id.into(),
            owner: owner.into(),
            payload,
            created_at: now,
            last_accessed: now,
            expires_at,
        })
    }

    /// `now > expires_at`, or the record was created with a TTL <= 0
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= self.created_at || now > self.expires_at
    }

    /// Record an access at `now`. `expires_at` is left alone.
    ///
    /// Clamped to `created_at` so a clock stepping backwards cannot break
    /// `created_at <= last_accessed`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed = now.max(self.created_at);
    }

    /// Combine `patch` into the payload key by key; patch wins on conflict
    pub fn merge_payload(&mut self, patch: Payload) {
        self.payload.extend(patch);
    }

    /// Replace the payload wholesale
    pub fn replace_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Time left before expiry, negative once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        self.expires_at - now
    }
}
