//! SQLite schema definition.

/// Database schema for the key-value store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-Value Store
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON text or opaque string
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
