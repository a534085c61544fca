use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{StorageError, StorageResult};
use crate::storage::area::{check_quota, StorageArea};

/// In‑memory local storage (no persistence). Used when no database path is configured.
#[derive(Default)]
pub struct InMemoryLocalArea {
    map: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryLocalArea {
    /// Creates an unbounded area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an area that rejects writes once `quota` UTF-16 units are in use.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.map
            .lock()
            .map_err(|_| StorageError::Unavailable("local storage lock poisoned".into()))
    }
}

impl StorageArea for InMemoryLocalArea {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self.lock()?;
        check_quota(&guard, self.quota, key, value)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.lock()?.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn keys(&self) -> Vec<String> {
        let mut v: Vec<String> = match self.lock() {
            Ok(m) => m.keys().cloned().collect(),
            Err(_) => return vec![],
        };
        v.sort_unstable();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_contract() {
        let area = InMemoryLocalArea::new();

        assert_eq!(area.len(), 0);
        assert!(area.get_item("missing").unwrap().is_none());

        area.set_item("a", "1").unwrap();
        area.set_item("b", "2").unwrap();
        assert_eq!(area.len(), 2);
        assert_eq!(area.keys(), vec!["a".to_string(), "b".to_string()]);

        area.remove_item("b").unwrap();
        assert_eq!(area.len(), 1);

        area.clear().unwrap();
        assert!(area.keys().is_empty());
    }

    #[test]
    fn quota_rejects_write_and_keeps_previous_value() {
        let area = InMemoryLocalArea::with_quota(8);
        area.set_item("key", "abc").unwrap();

        let err = area.set_item("key", "abcdefgh").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { ref key, limit: 8 } if key == "key"));

        assert_eq!(area.get_item("key").unwrap().as_deref(), Some("abc"));
    }
}
