//! Key-value storage backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser exposes `localStorage` and `sessionStorage`; both speak the
//! same string-to-string API. `KeyValueStore` mirrors that API so the session
//! logic runs against [`MemoryStorage`] natively and against
//! `crate::browser::BrowserStorage` under `hydrate`.
//!
//! TRADE-OFFS
//! ==========
//! Writes are best-effort. A full quota or private-mode browser rejects
//! `setItem`; implementations log and carry on rather than fail the caller.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Synchronous string storage shared by every script on the page.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
    /// Snapshot of all keys currently present.
    fn keys(&self) -> Vec<String>;
}

/// In-memory store with the same semantics as a browser storage area.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }
}

/// Load a JSON value stored under `key`.
///
/// Missing keys and malformed JSON both read as `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring malformed value under {key}: {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set_item(key, &raw),
        Err(e) => log::warn!("failed to encode value for {key}: {e}"),
    }
}

/// Remove every key starting with `prefix`, returning the removed keys.
///
/// Keys are collected before removal; deleting while walking a live browser
/// storage shifts its indices.
pub fn remove_prefixed(store: &dyn KeyValueStore, prefix: &str) -> Vec<String> {
    let doomed: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|key| key.starts_with(prefix))
        .collect();
    for key in &doomed {
        store.remove_item(key);
    }
    doomed
}
