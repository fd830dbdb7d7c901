//! Configuration for SessionKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, SessionError};

/// Default session lifetime: one hour
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Main configuration for a SessionStore
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Expiry Configuration
    // -------------------------------------------------------------------------
    /// Lifetime (seconds) applied when `create` is not given a TTL.
    /// Must be positive.
    pub default_ttl_secs: i64,

    // -------------------------------------------------------------------------
    // Persistence Configuration
    // -------------------------------------------------------------------------
    /// Directory holding one `{id}.json` file per session.
    /// `None` keeps the store purely in memory.
    pub data_dir: Option<PathBuf>,

    /// fsync each record file before it is renamed into place
    pub sync_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_TTL_SECS,
            data_dir: None,
            sync_writes: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.default_ttl_secs <= 0 {
            return Err(SessionError::Config(format!(
                "default TTL must be positive, got {}",
                self.default_ttl_secs
            )));
        }

        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(SessionError::Config("data directory must not be empty".to_string()));
            }
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default session lifetime (in seconds)
    pub fn default_ttl_secs(mut self, secs: i64) -> Self {
        self.config.default_ttl_secs = secs;
        self
    }

    /// Persist sessions under this directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = Some(path.into());
        self
    }

    /// Keep sessions in memory only
    pub fn in_memory(mut self) -> Self {
        self.config.data_dir = None;
        self
    }

    /// Set whether record files are fsynced on write
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
