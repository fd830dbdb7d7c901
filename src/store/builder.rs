//! Store construction
//!
//! Wires the collaborators (persistence, clock, id source) into a
//! [`SessionStore`] and runs rehydration.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::id::{IdGenerator, UuidGenerator};
use crate::persistence::{FileBackend, Persistence};

use super::SessionStore;

/// Builder for SessionStore
///
/// Defaults: wall clock, UUID v4 ids, and a [`FileBackend`] on
/// `config.data_dir` when one is set (in-memory only otherwise).
pub struct StoreBuilder {
    config: Config,
    persistence: Option<Arc<dyn Persistence>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl StoreBuilder {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            config,
            persistence: None,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Mirror sessions into `backend` instead of `config.data_dir`
    pub fn persistence<P: Persistence + 'static>(mut self, backend: Arc<P>) -> Self {
        self.persistence = Some(backend as Arc<dyn Persistence>);
        self
    }

    /// Use a custom time source
    pub fn clock<C: Clock + 'static>(mut self, clock: Arc<C>) -> Self {
        self.clock = clock as Arc<dyn Clock>;
        self
    }

    /// Use a custom session id source
    pub fn id_generator<G: IdGenerator + 'static>(mut self, ids: Arc<G>) -> Self {
        self.ids = ids as Arc<dyn IdGenerator>;
        self
    }

    /// Validate the config, open the backend and rehydrate
    pub fn open(self) -> Result<SessionStore> {
        self.config.validate()?;

        let persistence = match self.persistence {
            Some(backend) => Some(backend),
            None => match &self.config.data_dir {
                Some(dir) => {
                    let backend = FileBackend::open(dir, self.config.sync_writes)?;
                    Some(Arc::new(backend) as Arc<dyn Persistence>)
                }
                None => None,
            },
        };

        SessionStore::from_parts(self.config, persistence, self.clock, self.ids)
    }
}
