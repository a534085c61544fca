use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{StorageError, StorageResult};

/// Object-safe key/value storage area (DOM's Storage).
///
/// This is the raw string store a backend adapter delegates to. Values are
/// opaque text; encoding happens one layer up.
pub trait StorageArea: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not found.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Sets the value for the given key, overwriting any existing value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the item with the given key. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Clears all items in the storage area.
    fn clear(&self) -> StorageResult<()>;

    /// Returns the number of items in the storage area.
    fn len(&self) -> usize;

    /// Returns true when the area holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a vector of all keys in the storage area.
    fn keys(&self) -> Vec<String>;
}

/// Shared handle to a storage area.
pub type StorageAreaHandle = Arc<dyn StorageArea>;

/// Default per-area quota, in UTF-16 code units (browsers allow roughly 5 MiB).
pub const DEFAULT_QUOTA: usize = 5 * 1024 * 1024;

/// Size of an entry the way browsers account for it: UTF-16 code units of key and value.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.encode_utf16().count() + value.encode_utf16().count()
}

/// Checks that replacing `key` with `value` keeps `entries` within `quota`.
pub(crate) fn check_quota(
    entries: &HashMap<String, String>,
    quota: Option<usize>,
    key: &str,
    value: &str,
) -> StorageResult<()> {
    let Some(limit) = quota else {
        return Ok(());
    };

    let used: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| entry_size(k, v))
        .sum();

    if used + entry_size(key, value) > limit {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            limit,
        });
    }

    Ok(())
}
