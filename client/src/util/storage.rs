//! Browser `localStorage` backing for the persisted session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes hydrate-only web-sys glue so the session core can treat
//! browser storage like any other [`KeyValueStore`]. On the server there is
//! no storage: reads come back empty and writes are refused.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{KeyValueStore, StorageError};

/// Handle onto `window.localStorage`. Zero-sized; every copy sees the same
/// browser storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn browser_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
}

#[cfg(feature = "hydrate")]
fn io_error(op: &'static str, key: &str, err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Io { op, key: key.to_owned(), reason: format!("{err:?}") }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?.get_item(key).map_err(|e| io_error("get", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?.set_item(key, value).map_err(|e| io_error("set", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable("not available on server".to_owned()))
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?.remove_item(key).map_err(|e| io_error("remove", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
