use std::fmt::Display;
use std::sync::{Arc, Mutex};

use super::types::StorageType;

/// Storage operation that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageOperation {
    Save,
    Load,
    Remove,
    Clear,
}

impl Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StorageOperation::Save => "saving",
            StorageOperation::Load => "loading",
            StorageOperation::Remove => "removing",
            StorageOperation::Clear => "clearing",
        };
        f.write_str(s)
    }
}

/// A contained storage failure.
#[derive(Clone, Debug)]
pub struct StorageDiagnostic {
    pub operation: StorageOperation,
    pub scope: StorageType,
    /// `None` for [`StorageOperation::Clear`], which is not tied to a key.
    pub key: Option<String>,
    pub error: String,
}

impl Display for StorageDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(
                f,
                "Error {} {} storage with key \"{}\": {}",
                self.operation, self.scope, key, self.error
            ),
            None => write!(f, "Error {} {} storage: {}", self.operation, self.scope, self.error),
        }
    }
}

/// Receives storage failures that were swallowed by an adapter.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: StorageDiagnostic);
}

pub type DiagnosticsHandle = Arc<dyn DiagnosticSink>;

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: StorageDiagnostic) {
        log::error!("{diagnostic}");
    }
}

/// Keeps diagnostics in memory so they can be inspected later.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<StorageDiagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<StorageDiagnostic> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: StorageDiagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}
