use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::area::StorageAreaHandle;
use super::diagnostics::{DiagnosticsHandle, StorageDiagnostic, StorageOperation};
use super::types::StorageType;
use crate::errors::{StorageError, StorageResult};

/// Typed key/value persistence over some backend.
///
/// None of the operations fail from the caller's point of view: errors are
/// reported to a diagnostic sink, writes leave the previous value in place, and
/// loads come back as `None`.
pub trait Storage<V>: Send + Sync {
    /// Serializes `value` and stores it under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &V);

    /// Returns the value stored under `key`, or `None` if there is none or it cannot be decoded.
    fn load(&self, key: &str) -> Option<V>;

    /// Deletes `key`. Missing keys are ignored.
    fn remove(&self, key: &str);

    /// Deletes every entry in the backend, including keys written by other services.
    fn clear(&self);
}

/// JSON codec plus error containment shared by both adapters.
struct JsonArea<V> {
    area: StorageAreaHandle,
    diagnostics: DiagnosticsHandle,
    scope: StorageType,
    _value: PhantomData<fn() -> V>,
}

impl<V: Serialize + DeserializeOwned> JsonArea<V> {
    fn new(area: StorageAreaHandle, diagnostics: DiagnosticsHandle, scope: StorageType) -> Self {
        Self {
            area,
            diagnostics,
            scope,
            _value: PhantomData,
        }
    }

    fn report(&self, operation: StorageOperation, key: Option<&str>, error: StorageError) {
        self.diagnostics.report(StorageDiagnostic {
            operation,
            scope: self.scope,
            key: key.map(str::to_string),
            error: error.to_string(),
        });
    }

    fn try_save(&self, key: &str, value: &V) -> StorageResult<()> {
        let json = serde_json::to_string(value)?;
        self.area.set_item(key, &json)
    }

    fn try_load(&self, key: &str) -> StorageResult<Option<V>> {
        match self.area.get_item(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &V) {
        if let Err(e) = self.try_save(key, value) {
            self.report(StorageOperation::Save, Some(key), e);
        }
    }

    fn load(&self, key: &str) -> Option<V> {
        self.try_load(key).unwrap_or_else(|e| {
            self.report(StorageOperation::Load, Some(key), e);
            None
        })
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.area.remove_item(key) {
            self.report(StorageOperation::Remove, Some(key), e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.area.clear() {
            self.report(StorageOperation::Clear, None, e);
        }
    }
}

/// Storage that persists across sessions.
pub struct LocalStorageAdapter<V> {
    inner: JsonArea<V>,
}

impl<V: Serialize + DeserializeOwned> LocalStorageAdapter<V> {
    pub fn new(area: StorageAreaHandle, diagnostics: DiagnosticsHandle) -> Self {
        Self {
            inner: JsonArea::new(area, diagnostics, StorageType::Local),
        }
    }
}

impl<V: Serialize + DeserializeOwned> Storage<V> for LocalStorageAdapter<V> {
    fn save(&self, key: &str, value: &V) {
        self.inner.save(key, value)
    }

    fn load(&self, key: &str) -> Option<V> {
        self.inner.load(key)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key)
    }

    fn clear(&self) {
        self.inner.clear()
    }
}

/// Storage scoped to the current session.
pub struct SessionStorageAdapter<V> {
    inner: JsonArea<V>,
}

impl<V: Serialize + DeserializeOwned> SessionStorageAdapter<V> {
    pub fn new(area: StorageAreaHandle, diagnostics: DiagnosticsHandle) -> Self {
        Self {
            inner: JsonArea::new(area, diagnostics, StorageType::Session),
        }
    }
}

impl<V: Serialize + DeserializeOwned> Storage<V> for SessionStorageAdapter<V> {
    fn save(&self, key: &str, value: &V) {
        self.inner.save(key, value)
    }

    fn load(&self, key: &str) -> Option<V> {
        self.inner.load(key)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key)
    }

    fn clear(&self) {
        self.inner.clear()
    }
}
