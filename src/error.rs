//! Error types for SessionKV
//!
//! Provides a unified error type for all operations.
//!
//! Absence of a session is not an error: `get` returns `None` and
//! `update`/`delete` return `false`. Only broken persistence, bad
//! configuration and unparseable records surface here.

use std::fmt;

use thiserror::Error;

/// Result type alias using SessionError
pub type Result<T> = std::result::Result<T, SessionError>;

/// Unified error type for SessionKV operations
#[derive(Debug, Error)]
pub enum SessionError {
    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Persistence {op} failed for key '{key}': {source}")]
    Persistence {
        op: PersistenceOp,
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid persistence key: {0}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Session owner must not be empty")]
    InvalidOwner,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Build a persistence error for `op` on `key`
    pub fn persistence(op: PersistenceOp, key: impl Into<String>, source: std::io::Error) -> Self {
        SessionError::Persistence {
            op,
            key: key.into(),
            source,
        }
    }

    /// True if this error came from the durable backend
    pub fn is_persistence(&self) -> bool {
        matches!(self, SessionError::Persistence { .. })
    }
}

/// The persistence call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOp {
    Put,
    Delete,
    Get,
    List,
    Open,
}

impl fmt::Display for PersistenceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PersistenceOp::Put => "put",
            PersistenceOp::Delete => "delete",
            PersistenceOp::Get => "get",
            PersistenceOp::List => "list",
            PersistenceOp::Open => "open",
        };
        f.write_str(name)
    }
}
