//! Key-value backing stores for the session.
//!
//! The session layer is written against the [`KeyValueStore`] trait so the
//! persistence backend can be injected: `SQLite` in production, an in-memory
//! map in tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A minimal durable key-value store.
///
/// All operations are synchronous and act on single keys; there is no
/// transactionality guarantee across keys. Writes to a key are atomic and
/// last-write-wins.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn remove(&self, key: &str) -> Result<()>;
}

/// `SQLite`-backed key-value store.
///
/// Holds one `session` table of `(key, value)` pairs. Single-user local
/// state, not a durability-critical store.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a session database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot
    /// be initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening session database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL keeps concurrent readers cheap
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::initialize_schema(&conn)?;

        info!("Session database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Self::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS session (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM session WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO session (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM session WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// In-memory key-value store.
///
/// Test fake for [`SqliteStore`]; same single-key semantics, nothing
/// persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores() -> Vec<Box<dyn KeyValueStore>> {
        vec![
            Box::new(MemoryStore::new()),
            Box::new(SqliteStore::open_in_memory().expect("failed to open in-memory store")),
        ]
    }

    #[test]
    fn test_get_missing_key() {
        for store in stores() {
            assert!(store.get("missing").unwrap().is_none());
        }
    }

    #[test]
    fn test_put_and_get() {
        for store in stores() {
            store.put("k", "v").unwrap();
            assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        }
    }

    #[test]
    fn test_put_overwrites() {
        for store in stores() {
            store.put("k", "old").unwrap();
            store.put("k", "new").unwrap();
            assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
        }
    }

    #[test]
    fn test_remove() {
        for store in stores() {
            store.put("k", "v").unwrap();
            store.remove("k").unwrap();
            assert!(store.get("k").unwrap().is_none());
        }
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        for store in stores() {
            assert!(store.remove("never-stored").is_ok());
        }
    }

    #[test]
    fn test_keys_are_independent() {
        for store in stores() {
            store.put("a", "1").unwrap();
            store.put("b", "2").unwrap();
            store.remove("a").unwrap();

            assert!(store.get("a").unwrap().is_none());
            assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        }
    }

    #[test]
    fn test_unicode_values() {
        for store in stores() {
            store.put("title", "SOS Miền Trung").unwrap();
            assert_eq!(store.get("title").unwrap().as_deref(), Some("SOS Miền Trung"));
        }
    }

    #[test]
    fn test_memory_store_len() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.put("a", "1").unwrap();
        store.put("b", "2").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sqlite_open_file_based() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("session.db");

        let store = SqliteStore::open(&db_path).unwrap();
        store.put("k", "v").unwrap();
        assert_eq!(store.path(), db_path);

        // Reopen and verify the value survived
        drop(store);
        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_sqlite_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested/deeper/session.db");

        let store = SqliteStore::open(&nested).unwrap();
        store.put("k", "v").unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_sqlite_in_memory_path() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }
}
