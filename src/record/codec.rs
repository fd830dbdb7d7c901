//! Record encoding
//!
//! Pretty-printed JSON, timestamps as RFC 3339 with nanoseconds and a UTC
//! offset. Decoding accepts the older `session_id` / `user_id` / `data`
//! field names.

use bytes::Bytes;

use super::Record;
use crate::error::{Result, SessionError};

impl Record {
    /// Encode every field of the record
    pub fn to_bytes(&self) -> Result<Bytes> {
        serde_json::to_vec_pretty(self)
            .map(Bytes::from)
            .map_err(|e| SessionError::Serialization(e.to_string()))
    }

    /// Decode a record written by [`Record::to_bytes`].
    ///
    /// Missing fields, unparseable timestamps, an empty id and
    /// `created_at > last_accessed` all fail with `MalformedRecord`.
    pub fn from_bytes(blob: &[u8]) -> Result<Self> {
        let record: Record = serde_json::from_slice(blob)
            .map_err(|e| SessionError::MalformedRecord(e.to_string()))?;

        if record.id.is_empty() {
            return Err(SessionError::MalformedRecord("empty id".to_string()));
        }

        if record.created_at > record.last_accessed {
            return Err(SessionError::MalformedRecord(format!(
                "record {} was accessed before it was created",
                record.id
            )));
        }

        Ok(record)
    }
}
