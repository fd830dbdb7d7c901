//! Rehydration
//!
//! Rebuilds the index from the durable mirror at store construction and
//! purges anything that should not survive a restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::Result;
use crate::persistence::Persistence;
use crate::record::Record;

/// What happened during rehydration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RehydrationReport {
    /// Live records inserted into the index
    pub loaded: usize,

    /// Expired entries deleted from the backend
    pub expired_purged: usize,

    /// Unparseable (or mislabelled) entries deleted from the backend
    pub malformed_purged: usize,
}

impl RehydrationReport {
    /// Entries seen in the backend
    pub fn scanned(&self) -> usize {
        self.loaded + self.expired_purged + self.malformed_purged
    }
}

/// Load every live record from `backend`.
///
/// Per key:
/// 1. Read and decode; on failure delete the entry and skip it
/// 2. An entry whose id differs from its key is treated as malformed
/// 3. Expired at `now`: delete the entry and skip it
/// 4. Otherwise keep it
///
/// Backend I/O failures abort rehydration and are returned.
pub(crate) fn rehydrate(
    backend: &dyn Persistence,
    now: DateTime<Utc>,
) -> Result<(HashMap<String, Record>, RehydrationReport)> {
    let mut index = HashMap::new();
    let mut report = RehydrationReport::default();

    for key in backend.list_keys()? {
        let blob = backend.get(&key)?;

        let record = match Record::from_bytes(&blob) {
            Ok(record) if record.id() == key => record,
            Ok(record) => {
                warn!(key = %key, id = %record.id(), "Persisted session id does not match its key, discarding");
                backend.delete(&key)?;
                report.malformed_purged += 1;
                continue;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding malformed persisted session");
                backend.delete(&key)?;
                report.malformed_purged += 1;
                continue;
            }
        };

        if record.is_expired(now) {
            backend.delete(&key)?;
            report.expired_purged += 1;
            continue;
        }

        index.insert(key, record);
        report.loaded += 1;
    }

    if report.scanned() > 0 {
        info!(
            loaded = report.loaded,
            expired_purged = report.expired_purged,
            malformed_purged = report.malformed_purged,
            "Session rehydration complete"
        );
    }

    Ok((index, report))
}
