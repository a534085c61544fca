use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{StorageError, StorageResult};
use crate::storage::area::{check_quota, StorageArea, StorageAreaHandle};

/// Identifies one browsing session (one tab).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type SessionMap = Arc<RwLock<HashMap<SessionId, HashMap<String, String>>>>;

/// In-memory session storage. Each session gets its own isolated area which
/// lives until [`InMemorySessionStore::end_session`] is called.
#[derive(Default)]
pub struct InMemorySessionStore {
    data: SessionMap,
    quota: Option<usize>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Areas handed out by this store reject writes past `quota` UTF-16 units.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            data: SessionMap::default(),
            quota: Some(quota),
        }
    }

    /// Returns the area for `session`, creating it on first use.
    pub fn area(&self, session: SessionId) -> StorageAreaHandle {
        if let Ok(mut guard) = self.data.write() {
            guard.entry(session).or_default();
        }

        Arc::new(SessionArea {
            data: Arc::clone(&self.data),
            session,
            quota: self.quota,
        })
    }

    /// Drops all data of `session`. Existing area handles for it read as empty afterwards.
    pub fn end_session(&self, session: SessionId) {
        if let Ok(mut guard) = self.data.write() {
            guard.remove(&session);
        }
    }

    /// Number of sessions currently holding an area.
    pub fn session_count(&self) -> usize {
        self.data.read().map(|g| g.len()).unwrap_or(0)
    }
}

struct SessionArea {
    data: SessionMap,
    session: SessionId,
    quota: Option<usize>,
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("session storage lock poisoned".into())
}

impl StorageArea for SessionArea {
    fn get_item(&self, k: &str) -> StorageResult<Option<String>> {
        Ok(self
            .data
            .read()
            .map_err(|_| poisoned())?
            .get(&self.session)
            .and_then(|m| m.get(k).cloned()))
    }

    fn set_item(&self, k: &str, v: &str) -> StorageResult<()> {
        let mut guard = self.data.write().map_err(|_| poisoned())?;
        let Some(entries) = guard.get_mut(&self.session) else {
            return Err(StorageError::Unavailable(format!(
                "session {} has ended",
                self.session
            )));
        };
        check_quota(entries, self.quota, k, v)?;
        entries.insert(k.to_string(), v.to_string());
        Ok(())
    }

    fn remove_item(&self, k: &str) -> StorageResult<()> {
        if let Some(m) = self.data.write().map_err(|_| poisoned())?.get_mut(&self.session) {
            m.remove(k);
        }
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        if let Some(m) = self.data.write().map_err(|_| poisoned())?.get_mut(&self.session) {
            m.clear();
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.data
            .read()
            .ok()
            .and_then(|g| g.get(&self.session).map(|m| m.len()))
            .unwrap_or(0)
    }

    fn keys(&self) -> Vec<String> {
        let mut v: Vec<String> = self
            .data
            .read()
            .ok()
            .and_then(|g| g.get(&self.session).map(|m| m.keys().cloned().collect()))
            .unwrap_or_default();
        v.sort_unstable();
        v
    }
}
