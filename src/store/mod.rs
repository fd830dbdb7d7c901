//! Store Module
//!
//! The session index and the rules that keep it consistent with its
//! durable mirror.
//!
//! ## Responsibilities
//! - Authoritative in-memory map: session id → [`Record`](crate::record::Record)
//! - Mirror every mutation to the [`Persistence`](crate::persistence::Persistence) backend
//! - Lazy eviction on read, explicit bulk sweep
//! - Rehydrate (and purge stale/corrupt entries) at construction
//!
//! ## Concurrency Model: one re-entrant lock
//!
//! Every public operation holds a single `ReentrantMutex` for its whole
//! duration, persistence I/O included. `update`, `sweep_expired` and
//! `clear` call `get`/`delete` while already holding it. A slow backend
//! therefore stalls every session operation in the process.
//!
//! ## Write Ordering: write-through, then commit
//!
//! ```text
//!   caller ──► lock ──► persistence.put/delete ──► index insert/remove ──► unlock
//!                              │
//!                              └── Err ──► index untouched, error returned
//! ```
//!
//! A crash after the durable write and before the in-memory commit loses
//! nothing: the durable copy is picked up on the next start.

mod builder;
mod rehydrate;
mod session_store;

pub use builder::StoreBuilder;
pub use rehydrate::RehydrationReport;
pub use session_store::SessionStore;
