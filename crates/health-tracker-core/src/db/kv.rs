//! Key-value operations.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{Database, DbError, DbResult};
use crate::store::{KeyValueStore, StoreResult};

impl Database {
    /// Read a value by key.
    pub fn get_value(&self, key: &str) -> DbResult<Option<String>> {
        self.conn()?
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    /// Insert or replace a value.
    pub fn set_value(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn()?.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    /// Delete a value. Returns whether a row existed.
    pub fn delete_value(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn()?
            .execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }

    /// Delete every value.
    pub fn clear_values(&self) -> DbResult<usize> {
        let rows_affected = self.conn()?.execute("DELETE FROM kv_store", [])?;
        Ok(rows_affected)
    }

    /// List stored keys, sorted.
    pub fn list_keys(&self) -> DbResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_value(key)?)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        Ok(self.set_value(key, value)?)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.delete_value(key)?;
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.clear_values()?;
        Ok(())
    }
}
