/// Failures raised by a storage area or while encoding a stored value.
///
/// These never reach the services: the adapters contain them and turn them
/// into diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Quota exceeded while writing \"{key}\" (limit {limit} units)")]
    QuotaExceeded { key: String, limit: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[cfg(feature = "sqlite_local_store")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] r2d2_sqlite::rusqlite::Error),

    #[cfg(feature = "sqlite_local_store")]
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
