//! Storage layer for quiz game data.
//!
//! Two levels live here:
//!
//! - **Areas** ([`StorageArea`]) are raw string key/value stores, the
//!   equivalent of a browser's `localStorage` or `sessionStorage` object.
//!   Local areas persist across sessions ([`SqliteLocalArea`]) or live in
//!   memory ([`InMemoryLocalArea`]); session areas come from an
//!   [`InMemorySessionStore`] and disappear when their session ends.
//! - **Adapters** ([`LocalStorageAdapter`], [`SessionStorageAdapter`]) wrap an
//!   area and implement the typed [`Storage`] capability. They encode values as
//!   JSON and contain every failure: errors go to a [`DiagnosticSink`] and never
//!   reach the caller.
//!
//! [`create_storage`] picks an adapter for a [`StorageType`] out of a
//! [`StorageHandles`] bundle.
//!
//! # Example
//!
//! ```
//! use quiz_storage::storage::{create_storage, Storage, StorageBackend, StorageHandles, StorageType};
//!
//! let handles = StorageHandles::in_memory();
//! let storage: StorageBackend<Vec<u32>> = create_storage(StorageType::Session, &handles);
//!
//! storage.save("scores", &vec![10, 50, 30]);
//! assert_eq!(storage.load("scores"), Some(vec![10, 50, 30]));
//! ```

use std::sync::Arc;

use anyhow::Result;

use crate::config::StorageConfig;

/// Storage area module, defining the key/value storage interface.
pub mod area;
/// Typed storage capability and the two backend adapters.
pub mod adapter;
/// Sinks for failures the adapters swallow.
pub mod diagnostics;
/// Backend selection.
pub mod selector;
/// Storage types
pub mod types;

/// Local storage module, providing persistent storage areas.
pub mod local {
    /// In-memory local storage implementation.
    pub mod in_memory;
    /// SQLite-backed local storage implementation.
    #[cfg(feature = "sqlite_local_store")]
    pub mod sqlite_store;
}

/// Session storage module, providing in-memory session storage.
pub mod session {
    /// In-memory session storage implementation.
    pub mod in_memory;
}

pub use adapter::{LocalStorageAdapter, SessionStorageAdapter, Storage};
pub use area::{StorageArea, StorageAreaHandle, DEFAULT_QUOTA};
pub use diagnostics::{
    DiagnosticSink, DiagnosticsHandle, LogSink, MemorySink, StorageDiagnostic, StorageOperation,
};
pub use local::in_memory::InMemoryLocalArea;
#[cfg(feature = "sqlite_local_store")]
pub use local::sqlite_store::SqliteLocalArea;
pub use selector::{create_storage, create_storage_by_name, StorageBackend};
pub use session::in_memory::{InMemorySessionStore, SessionId};
pub use types::StorageType;

/// Handles to both local and session storage areas, plus where failures are reported.
#[derive(Clone)]
pub struct StorageHandles {
    /// Local storage area, persistent across sessions.
    pub local: StorageAreaHandle,
    /// Session storage area, tied to one session.
    pub session: StorageAreaHandle,
    /// Receives the failures adapters contain.
    pub diagnostics: DiagnosticsHandle,
}

impl StorageHandles {
    pub fn new(local: StorageAreaHandle, session: StorageAreaHandle, diagnostics: DiagnosticsHandle) -> Self {
        Self {
            local,
            session,
            diagnostics,
        }
    }

    /// Unbounded in-memory areas reporting to the log.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryLocalArea::new()),
            Arc::new(InMemoryLocalArea::new()),
            Arc::new(LogSink),
        )
    }

    /// Builds handles for one session according to `config`.
    ///
    /// The local area is SQLite-backed when `config.local_path` is set, in-memory otherwise.
    pub fn from_config(config: &StorageConfig, sessions: &InMemorySessionStore, session: SessionId) -> Result<Self> {
        let local: StorageAreaHandle = match &config.local_path {
            #[cfg(feature = "sqlite_local_store")]
            Some(path) => Arc::new(SqliteLocalArea::new(path)?),
            #[cfg(not(feature = "sqlite_local_store"))]
            Some(path) => anyhow::bail!(
                "local storage path {} requires the sqlite_local_store feature",
                path.display()
            ),
            None => match config.local_quota {
                Some(quota) => Arc::new(InMemoryLocalArea::with_quota(quota)),
                None => Arc::new(InMemoryLocalArea::new()),
            },
        };

        Ok(Self::new(local, sessions.area(session), Arc::new(LogSink)))
    }

    /// Replaces the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsHandle) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
