use anyhow::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::{params, OpenFlags, OptionalExtension};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::errors::StorageResult;
use crate::storage::area::StorageArea;

/// SQLite-based local storage. Entries survive process restarts.
pub struct SqliteLocalArea {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteLocalArea {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manager = SqliteConnectionManager::file(path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI,
            )
            .with_init(|c| {
                c.busy_timeout(std::time::Duration::from_millis(500))?;
                c.pragma_update(None, "journal_mode", "WAL")?;
                c.execute_batch(
                    "CREATE TABLE IF NOT EXISTS local_storage (
                        key TEXT NOT NULL PRIMARY KEY,
                        value TEXT NOT NULL,
                        updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
                    );",
                )?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(std::time::Duration::from_secs(5))
            .build(manager)?;

        log::debug!("opened sqlite local storage at {}", path.display());

        Ok(Self { pool })
    }

    fn conn(&self) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl StorageArea for SqliteLocalArea {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key=?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO local_storage(key,value) VALUES (?1,?2)
             ON CONFLICT(key) DO UPDATE
             SET value=excluded.value, updated_at=strftime('%s','now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM local_storage WHERE key=?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM local_storage", [])?;
        Ok(())
    }

    fn len(&self) -> usize {
        let conn = match self.conn() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row::<u32, _, _>("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))
            .unwrap_or(0) as usize
    }

    fn keys(&self) -> Vec<String> {
        let conn = match self.conn() {
            Ok(c) => c,
            Err(_) => return vec![],
        };
        let mut stmt = match conn.prepare("SELECT key FROM local_storage ORDER BY key") {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        let rows = match stmt.query_map([], |row| row.get::<_, String>(0)) {
            Ok(r) => r,
            Err(_) => return vec![],
        };

        rows.filter_map(|r| r.ok()).collect()
    }
}
