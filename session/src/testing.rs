//! Test doubles shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{ApiError, StorageError};
use crate::gateway::{ApiClient, ApiRequest, ApiResponse, Transport};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::types::User;

pub(crate) const BASE_URL: &str = "http://backend.test";

pub(crate) fn alice() -> User {
    User {
        id: "1".to_owned(),
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        github_id: None,
    }
}

pub(crate) fn alice_login_body() -> String {
    serde_json::json!({
        "token": "abc123",
        "user": { "id": "1", "username": "alice", "email": "alice@example.com" }
    })
    .to_string()
}

/// Transport that replays queued responses and records every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, status: u16, body: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, reason: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport(reason.to_owned())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_owned())))
    }
}

pub(crate) fn client(transport: ScriptedTransport, storage: &MemoryStore) -> ApiClient<ScriptedTransport, MemoryStore> {
    ApiClient::new(BASE_URL, transport, storage.clone())
}

/// Memory store whose writes to one key always fail.
#[derive(Clone, Debug, Default)]
pub(crate) struct FailingStore {
    pub(crate) inner: MemoryStore,
    fail_key: &'static str,
}

impl FailingStore {
    pub(crate) fn failing_on(fail_key: &'static str) -> Self {
        Self { inner: MemoryStore::new(), fail_key }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.fail_key {
            return Err(StorageError::Io { op: "set", key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
