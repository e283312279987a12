//! Local Storage Binding
//!
//! `KvStorage` over `window.localStorage`.

use atelier_core::{KvStorage, StorageError, StorageResult};

pub struct WebStorage {
    storage: Option<web_sys::Storage>,
}

impl WebStorage {
    /// Bind to `window.localStorage`; without it every call fails and the
    /// stores simply start empty
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, nothing will be cached");
        }
        Self { storage }
    }

    fn backend(&self) -> StorageResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl KvStorage for WebStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.backend()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.backend()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}
