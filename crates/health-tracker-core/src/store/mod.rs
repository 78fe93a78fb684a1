//! Persistence port: string keys to string values.
//!
//! Everything the tracker keeps between runs goes through [`KeyValueStore`].
//! [`MemoryStore`] plays the role of browser local storage; the SQLite
//! [`Database`](crate::db::Database) is the durable backing.

mod memory;

pub use memory::*;

use thiserror::Error;

use crate::db::DbError;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value persistence over string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Remove every key.
    fn clear(&self) -> StoreResult<()>;
}
