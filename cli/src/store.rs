//! File-backed persisted storage for the CLI session.
//!
//! The whole key space lives in one JSON object (`session.json`) under the
//! state directory. Every write rewrites the file through a temp file and a
//! rename so a crash never leaves half a document behind. A document that
//! does not parse reads as empty and is replaced by the next write.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use session::{KeyValueStore, StorageError};

pub const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store rooted at `state_dir/session.json`. Nothing is created until
    /// the first write.
    pub fn in_dir(state_dir: impl AsRef<Path>) -> Self {
        Self { path: state_dir.as_ref().join(SESSION_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, op: &'static str, key: &str) -> Result<Document, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(io_error(op, key, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(Document::default());
        }
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(Document { entries, corrupt: false }),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(Document { entries: BTreeMap::new(), corrupt: true })
            }
        }
    }

    fn save(&self, op: &'static str, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(op, key, &e))?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|e| io_error(op, key, &e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, rendered).map_err(|e| io_error(op, key, &e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(op, key, &e))
    }
}

/// Parsed contents of the session file.
#[derive(Debug, Default)]
struct Document {
    entries: BTreeMap<String, String>,
    /// The file exists but did not parse; any write must replace it.
    corrupt: bool,
}

fn io_error(op: &'static str, key: &str, err: &dyn std::fmt::Display) -> StorageError {
    StorageError::Io { op, key: key.to_owned(), reason: err.to_string() }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load("get", key)?.entries.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut doc = self.load("set", key)?;
        doc.entries.insert(key.to_owned(), value.to_owned());
        self.save("set", key, &doc.entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut doc = self.load("remove", key)?;
        if doc.entries.remove(key).is_none() && !doc.corrupt {
            return Ok(());
        }
        self.save("remove", key, &doc.entries)
    }
}
