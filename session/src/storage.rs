//! Persisted key-value storage for the session snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two string keys mirror the in-memory session: `token` holds the
//! JSON-encoded credential and `user` the JSON-encoded identity record. They
//! are always written and cleared together. The browser backs this with
//! `localStorage`, the CLI with a file, tests with [`MemoryStore`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;
use crate::types::{Credential, User};

/// Storage key for the JSON-encoded bearer credential.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-encoded identity record.
pub const USER_KEY: &str = "user";

/// String-keyed persisted storage.
///
/// Methods take `&self`: implementations are handles onto shared storage, so
/// the session store and the API gateway can each hold one.
pub trait KeyValueStore {
    /// Read the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries, for assertions and debugging.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Outcome of reading the persisted snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Snapshot {
    /// Both keys absent.
    Empty,
    /// Both keys present and decodable.
    Complete(Credential, User),
    /// One key missing, or a value that does not decode.
    Invalid,
}

/// Read and decode both session keys.
pub(crate) fn read_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Snapshot {
    let token = match store.get(TOKEN_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("session storage read failed: {e}");
            return Snapshot::Empty;
        }
    };
    let user = match store.get(USER_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("session storage read failed: {e}");
            return Snapshot::Empty;
        }
    };

    match (token, user) {
        (None, None) => Snapshot::Empty,
        (Some(token), Some(user)) => {
            let token = serde_json::from_str::<Credential>(&token);
            let user = serde_json::from_str::<User>(&user);
            match (token, user) {
                (Ok(token), Ok(user)) => Snapshot::Complete(token, user),
                _ => Snapshot::Invalid,
            }
        }
        _ => Snapshot::Invalid,
    }
}

/// Read only the persisted credential; absent or undecodable yields `None`.
pub(crate) fn read_credential<S: KeyValueStore + ?Sized>(store: &S) -> Option<Credential> {
    let raw = match store.get(TOKEN_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("credential read failed: {e}");
            return None;
        }
    };
    match serde_json::from_str::<Credential>(&raw) {
        Ok(token) => Some(token),
        Err(e) => {
            log::warn!("ignoring undecodable persisted credential: {e}");
            None
        }
    }
}

/// Write both session keys. If the second write fails the token key is put
/// back the way it was, so storage never holds half of a new snapshot.
pub(crate) fn write_snapshot<S: KeyValueStore + ?Sized>(
    store: &S,
    credential: &Credential,
    user: &User,
) -> Result<(), StorageError> {
    let token_json = encode(TOKEN_KEY, credential)?;
    let user_json = encode(USER_KEY, user)?;

    let previous_token = store.get(TOKEN_KEY)?;
    store.set(TOKEN_KEY, &token_json)?;
    if let Err(e) = store.set(USER_KEY, &user_json) {
        let restored = match &previous_token {
            Some(raw) => store.set(TOKEN_KEY, raw),
            None => store.remove(TOKEN_KEY),
        };
        if let Err(restore_err) = restored {
            log::warn!("failed to roll back `{TOKEN_KEY}` after write failure: {restore_err}");
        }
        return Err(e);
    }
    Ok(())
}

/// Remove both session keys, logging (not returning) failures.
pub(crate) fn clear_snapshot<S: KeyValueStore + ?Sized>(store: &S) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = store.remove(key) {
            log::warn!("failed to clear `{key}` from session storage: {e}");
        }
    }
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Io {
        op: "encode",
        key: key.to_owned(),
        reason: e.to_string(),
    })
}
