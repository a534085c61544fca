use std::path::PathBuf;

use crate::storage::{InMemorySessionStore, StorageType, DEFAULT_QUOTA};

/// Environment variable selecting the default backend (`local` or `session`).
pub const STORAGE_TYPE_ENV: &str = "QUIZ_STORAGE_TYPE";
/// Environment variable pointing at the SQLite file used for local storage.
pub const STORAGE_PATH_ENV: &str = "QUIZ_STORAGE_PATH";
/// Environment variable overriding the per-area quota, in UTF-16 units.
pub const STORAGE_QUOTA_ENV: &str = "QUIZ_STORAGE_QUOTA";

/// Storage configuration shared by the services.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Backend services use when none is given explicitly
    pub default_type: StorageType,
    /// Quota for in-memory local storage (ignored for SQLite)
    pub local_quota: Option<usize>,
    /// Quota for each session area
    pub session_quota: Option<usize>,
    /// SQLite database for local storage; in-memory when unset
    pub local_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_type: StorageType::Local,
            local_quota: Some(DEFAULT_QUOTA),
            session_quota: Some(DEFAULT_QUOTA),
            local_path: None,
        }
    }
}

impl StorageConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(STORAGE_TYPE_ENV) {
            config.default_type = StorageType::from_name(&name);
        }

        if let Some(path) = lookup(STORAGE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.local_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(STORAGE_QUOTA_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(quota) => {
                    config.local_quota = Some(quota);
                    config.session_quota = Some(quota);
                }
                Err(e) => log::warn!("ignoring {STORAGE_QUOTA_ENV}={raw:?}: {e}"),
            }
        }

        config
    }

    /// Creates a session store honouring `session_quota`.
    pub fn session_store(&self) -> InMemorySessionStore {
        match self.session_quota {
            Some(quota) => InMemorySessionStore::with_quota(quota),
            None => InMemorySessionStore::new(),
        }
    }
}
