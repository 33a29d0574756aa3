//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist key/value pairs in `kv_entries`.
//! - Record every mutation in `storage_events` so other handles on the same
//!   file observe it, mirroring cross-context storage notifications.
//!
//! # Invariants
//! - Entry mutation and its event row commit in one transaction.
//! - `poll_events` never returns rows authored by this handle's origin.
//! - A fresh handle starts after the newest existing event; history written
//!   before it opened is not replayed.

use super::{KeyValueStore, StorageEvent, StorageEventSource, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::Cell;
use std::path::Path;
use uuid::Uuid;

/// One context handle over a SQLite store.
pub struct SqliteStore {
    conn: Connection,
    origin: Uuid,
    last_seen_seq: Cell<i64>,
}

impl SqliteStore {
    /// Opens (and migrates) a store file as a new context.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        let newest: i64 =
            conn.query_row("SELECT COALESCE(MAX(seq), 0) FROM storage_events;", [], |row| {
                row.get(0)
            })?;
        Ok(Self {
            conn,
            origin: Uuid::new_v4(),
            last_seen_seq: Cell::new(newest),
        })
    }

    /// Stable id stamped on events written through this handle.
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    fn current_value(conn: &Connection, key: &str) -> StoreResult<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn record_event(
        &self,
        conn: &Connection,
        key: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> StoreResult<()> {
        conn.execute(
            "INSERT INTO storage_events (origin, key, old_value, new_value)
             VALUES (?1, ?2, ?3, ?4);",
            params![self.origin.to_string(), key, old_value, new_value],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Self::current_value(&self.conn, key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let old_value = Self::current_value(&tx, key)?;
        if old_value.as_deref() == Some(value) {
            return Ok(());
        }

        tx.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        self.record_event(&tx, key, old_value.as_deref(), Some(value))?;
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(old_value) = Self::current_value(&tx, key)? else {
            return Ok(());
        };

        tx.execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        self.record_event(&tx, key, Some(old_value.as_str()), None)?;
        tx.commit()?;
        Ok(())
    }
}

impl StorageEventSource for SqliteStore {
    fn poll_events(&self) -> StoreResult<Vec<StorageEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT seq, origin, key, old_value, new_value
             FROM storage_events
             WHERE seq > ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([self.last_seen_seq.get()])?;
        let origin = self.origin.to_string();
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            self.last_seen_seq.set(row.get(0)?);
            let author: String = row.get(1)?;
            if author == origin {
                continue;
            }
            events.push(StorageEvent::new(
                row.get::<_, String>(2)?,
                row.get(3)?,
                row.get(4)?,
            ));
        }

        Ok(events)
    }
}
