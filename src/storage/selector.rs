use serde::de::DeserializeOwned;
use serde::Serialize;

use super::adapter::{LocalStorageAdapter, SessionStorageAdapter, Storage};
use super::types::StorageType;
use super::StorageHandles;

/// One of the two backend adapters, chosen at construction time.
pub enum StorageBackend<V> {
    Local(LocalStorageAdapter<V>),
    Session(SessionStorageAdapter<V>),
}

impl<V> StorageBackend<V> {
    /// The kind of backend this value wraps.
    pub fn kind(&self) -> StorageType {
        match self {
            StorageBackend::Local(_) => StorageType::Local,
            StorageBackend::Session(_) => StorageType::Session,
        }
    }
}

impl<V: Serialize + DeserializeOwned> Storage<V> for StorageBackend<V> {
    fn save(&self, key: &str, value: &V) {
        match self {
            StorageBackend::Local(s) => s.save(key, value),
            StorageBackend::Session(s) => s.save(key, value),
        }
    }

    fn load(&self, key: &str) -> Option<V> {
        match self {
            StorageBackend::Local(s) => s.load(key),
            StorageBackend::Session(s) => s.load(key),
        }
    }

    fn remove(&self, key: &str) {
        match self {
            StorageBackend::Local(s) => s.remove(key),
            StorageBackend::Session(s) => s.remove(key),
        }
    }

    fn clear(&self) {
        match self {
            StorageBackend::Local(s) => s.clear(),
            StorageBackend::Session(s) => s.clear(),
        }
    }
}

/// Builds a fresh adapter of the requested kind over the matching area in `handles`.
pub fn create_storage<V>(kind: StorageType, handles: &StorageHandles) -> StorageBackend<V>
where
    V: Serialize + DeserializeOwned,
{
    let diagnostics = handles.diagnostics.clone();
    match kind {
        StorageType::Local => StorageBackend::Local(LocalStorageAdapter::new(handles.local.clone(), diagnostics)),
        StorageType::Session => {
            StorageBackend::Session(SessionStorageAdapter::new(handles.session.clone(), diagnostics))
        }
    }
}

/// Like [`create_storage`], resolving the backend from its name. Unknown names select local storage.
pub fn create_storage_by_name<V>(name: &str, handles: &StorageHandles) -> StorageBackend<V>
where
    V: Serialize + DeserializeOwned,
{
    create_storage(StorageType::from_name(name), handles)
}
