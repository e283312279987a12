//! Local Persistence
//!
//! Stores mirror their list and last-fetch time into an opaque key-value
//! blob store. Blobs are versioned:
//! `{"version": 1, "state": {"items": [...], "lastFetched": "..."}}`, plus
//! `"scope": "<client id>"` when the list holds one client's records only.
//! A blob with another version, or one that fails to parse, is ignored.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;

/// Current blob format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Opaque string blob store (`window.localStorage` in the browser)
pub trait KvStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-memory storage, for tests and for running without a browser
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The persisted part of a store's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    pub last_fetched: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Deserialize)]
struct Persisted<T> {
    version: u32,
    state: Snapshot<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a, T> {
    items: &'a [T],
    last_fetched: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
}

#[derive(Serialize)]
struct PersistedRef<'a, T> {
    version: u32,
    state: SnapshotRef<'a, T>,
}

/// Read a snapshot; `None` when absent, unreadable or from another version
pub fn load_snapshot<T: DeserializeOwned>(storage: &dyn KvStorage, key: &str) -> Option<Snapshot<T>> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Could not read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str::<Persisted<T>>(&raw) {
        Ok(persisted) if persisted.version == SNAPSHOT_VERSION => Some(persisted.state),
        Ok(persisted) => {
            tracing::warn!(
                "Discarding {} snapshot with version {} (expected {})",
                key,
                persisted.version,
                SNAPSHOT_VERSION
            );
            None
        }
        Err(e) => {
            tracing::warn!("Discarding unreadable {} snapshot: {}", key, e);
            None
        }
    }
}

/// Write the listed fields of a store's state
pub fn save_snapshot<T: Serialize>(
    storage: &dyn KvStorage,
    key: &str,
    items: &[T],
    last_fetched: Option<DateTime<Utc>>,
    scope: Option<&str>,
) -> StorageResult<()> {
    let blob = PersistedRef {
        version: SNAPSHOT_VERSION,
        state: SnapshotRef {
            items,
            last_fetched,
            scope,
        },
    };
    let json = serde_json::to_string(&blob)?;
    storage.set(key, &json)
}
