//! # SessionKV
//!
//! An embeddable store for expiring, owner-tagged sessions with:
//! - Fixed (non-sliding) TTL per session
//! - Lazy eviction on read plus an explicit sweep
//! - One-file-per-session persistence, rehydrated on startup
//! - A single re-entrant lock serializing every operation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Host application (auth layer)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ create / get / update / delete / sweep
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      SessionStore                            │
//! │              (ReentrantMutex, write-through)                 │
//! └──────┬──────────────┬──────────────────┬────────────────────┘
//!        │              │                  │
//!        ▼              ▼                  ▼
//!   ┌─────────┐   ┌───────────┐   ┌─────────────────┐
//!   │  Index  │   │ Clock /   │   │   Persistence   │
//!   │(Records)│   │ IdGen     │   │ (FileBackend)   │
//!   └─────────┘   └───────────┘   └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sessionkv::{Config, SessionStore};
//!
//! # fn main() -> sessionkv::Result<()> {
//! let store = SessionStore::open(Config::builder().data_dir("./sessions").build())?;
//! let id = store.create("u1", None, Some(3600))?;
//! assert!(store.get(&id)?.is_some());
//! store.sweep_expired()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod clock;
pub mod id;
pub mod record;
pub mod persistence;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PersistenceOp, Result, SessionError};
pub use config::Config;
pub use clock::{Clock, ManualClock, SystemClock};
pub use id::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use record::{Payload, Record};
pub use persistence::{FileBackend, MemoryBackend, Persistence};
pub use store::{RehydrationReport, SessionStore, StoreBuilder};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SessionKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
