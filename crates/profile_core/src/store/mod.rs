//! Shared key-value store contracts.
//!
//! # Responsibility
//! - Abstract the client-side key-value store every component reads and writes.
//! - Deliver cross-context mutation notifications as typed `StorageEvent`s.
//!
//! # Invariants
//! - A context never receives events for its own writes.
//! - Events are delivered in the order the store recorded them.
//! - Values are opaque strings; JSON shape is enforced by readers, not here.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store transport and value encoding failures.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// A stored value is present but not in the shape a writer must extend.
    Malformed { key: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode stored value: {err}"),
            Self::Malformed { key } => write!(f, "stored value under `{key}` is malformed"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// One mutation observed from another context.
///
/// `new_value == None` means the key was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl StorageEvent {
    pub fn new(
        key: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            key: key.into(),
            old_value,
            new_value,
        }
    }
}

/// Storage interface shared by the guard, projections and the access gate.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Source of mutations made by other contexts sharing the same store.
pub trait StorageEventSource {
    /// Drains pending events, oldest first.
    fn poll_events(&self) -> StoreResult<Vec<StorageEvent>>;
}

/// JSON helpers over any `KeyValueStore`.
pub trait StoreJsonExt: KeyValueStore {
    /// Reads and decodes one key.
    ///
    /// Missing keys, read failures and malformed JSON all yield `None`; the
    /// latter two are logged so broken state stays visible in diagnostics.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error key={} error={}",
                    key, err
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=store_read module=store status=malformed key={} error={}",
                    key, err
                );
                None
            }
        }
    }

    /// Reads a JSON sequence, decoding each element on its own.
    ///
    /// A non-sequence value reads as `None`; elements that fail to decode are
    /// logged and skipped while the rest are kept in order.
    fn read_json_list<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let items: Vec<serde_json::Value> = self.read_json(key)?;
        let total = items.len();
        let decoded: Vec<T> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(
                        "event=store_read module=store status=skipped key={} index={} error={}",
                        key, index, err
                    );
                    None
                }
            })
            .collect();
        if decoded.len() < total {
            warn!(
                "event=store_read module=store status=partial key={} kept={} total={}",
                key,
                decoded.len(),
                total
            );
        }
        Some(decoded)
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, &encoded)
    }
}

impl<S: KeyValueStore + ?Sized> StoreJsonExt for S {}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
