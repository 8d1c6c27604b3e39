//! [`SqliteStorage`]: the SQLite implementation of [`Storage`].

use std::{
  path::Path,
  sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use finder_core::storage::Storage;
use rusqlite::{Connection, OptionalExtension as _};

use crate::{Error, Result, schema::SCHEMA};

/// A key-value storage backed by a single SQLite file.
///
/// All access goes through one connection guarded by a mutex, so each
/// `get_item` / `set_item` call is serialised.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

impl SqliteStorage {
  /// Open (or create) a storage at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    tracing::debug!(path = %path.display(), "opened sqlite storage");
    Self::init(conn)
  }

  /// Open an in-memory storage, useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| Error::Poisoned)
  }

  /// When `key` was last written. Returns `None` if the key is absent.
  pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn()?
      .query_row(
        "SELECT updated_at FROM storage WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
      )
      .optional()?;

    raw
      .map(|s| {
        DateTime::parse_from_rfc3339(&s)
          .map(|dt| dt.with_timezone(&Utc))
          .map_err(|e| Error::DateParse(e.to_string()))
      })
      .transpose()
  }
}

// ─── Storage impl ────────────────────────────────────────────────────────────

impl Storage for SqliteStorage {
  type Error = Error;

  fn get_item(&self, key: &str) -> Result<Option<String>> {
    Ok(
      self
        .conn()?
        .query_row(
          "SELECT value FROM storage WHERE key = ?1",
          rusqlite::params![key],
          |row| row.get(0),
        )
        .optional()?,
    )
  }

  fn set_item(&self, key: &str, value: &str) -> Result<()> {
    let at_str = Utc::now().to_rfc3339();
    self.conn()?.execute(
      "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                      updated_at = excluded.updated_at",
      rusqlite::params![key, value, at_str],
    )?;
    tracing::trace!(key, bytes = value.len(), "sqlite item written");
    Ok(())
  }
}
