use super::*;
use crate::error::{ApiError, ValidationError};
use crate::gateway::AUTHORIZATION;
use crate::storage::{MemoryStore, TOKEN_KEY, USER_KEY};
use crate::testing::{FailingStore, ScriptedTransport, alice, alice_login_body, client};

fn persisted(store: &MemoryStore) -> (Option<String>, Option<String>) {
    let entries = store.entries();
    (entries.get(TOKEN_KEY).cloned(), entries.get(USER_KEY).cloned())
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn new_store_starts_initializing() {
    let store = SessionStore::new(MemoryStore::new());
    assert_eq!(store.state(), &SessionState::Initializing);
    assert!(store.user().is_none());
}

#[test]
fn hydrate_without_credential_is_unauthenticated() {
    let mut store = SessionStore::new(MemoryStore::new());
    assert_eq!(store.hydrate(), &SessionState::Unauthenticated);
}

#[test]
fn hydrate_with_only_user_is_unauthenticated_and_cleans_up() {
    let storage = MemoryStore::new();
    storage.set(USER_KEY, &serde_json::to_string(&alice()).unwrap()).unwrap();
    let mut store = SessionStore::new(storage.clone());
    assert_eq!(store.hydrate(), &SessionState::Unauthenticated);
    assert_eq!(persisted(&storage), (None, None));
}

#[test]
fn hydrate_with_corrupt_json_is_unauthenticated() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, r#""abc123""#).unwrap();
    storage.set(USER_KEY, "not-json").unwrap();
    let store = SessionStore::hydrated(storage.clone());
    assert_eq!(store.state(), &SessionState::Unauthenticated);
    assert_eq!(persisted(&storage), (None, None));
}

#[test]
fn hydrate_with_token_and_user_is_authenticated_with_that_identity() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, r#""abc123""#).unwrap();
    storage.set(USER_KEY, &serde_json::to_string(&alice()).unwrap()).unwrap();

    let store = SessionStore::hydrated(storage);
    assert_eq!(
        store.state(),
        &SessionState::Authenticated(Session { user: alice(), credential: Credential::new("abc123") })
    );
}

#[test]
fn hydrate_reads_storage_only_once() {
    let storage = MemoryStore::new();
    let mut store = SessionStore::hydrated(storage.clone());
    storage.set(TOKEN_KEY, r#""abc123""#).unwrap();
    storage.set(USER_KEY, &serde_json::to_string(&alice()).unwrap()).unwrap();
    assert_eq!(store.hydrate(), &SessionState::Unauthenticated);
}

// =============================================================
// Login
// =============================================================

#[tokio::test]
async fn log_in_success_sets_session_and_persists_json() {
    let storage = MemoryStore::new();
    let api = client(ScriptedTransport::new().reply(200, alice_login_body()), &storage);
    let mut store = SessionStore::hydrated(storage.clone());

    let user = store.log_in(&api, "alice@example.com", "secret").await.unwrap();
    assert_eq!(user, alice());
    assert_eq!(store.state().credential(), Some(&Credential::new("abc123")));
    assert_eq!(store.user(), Some(&alice()));

    let (token, stored_user) = persisted(&storage);
    assert_eq!(token.as_deref(), Some(r#""abc123""#));
    let stored_user: User = serde_json::from_str(&stored_user.unwrap()).unwrap();
    assert_eq!(stored_user, alice());

    let requests = api.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://backend.test/api/users/login");
    assert_eq!(
        requests[0].body,
        Some(serde_json::json!({ "identifier": "alice@example.com", "password": "secret" }))
    );
}

#[tokio::test]
async fn log_in_then_restart_reproduces_session() {
    let storage = MemoryStore::new();
    let api = client(ScriptedTransport::new().reply(200, alice_login_body()), &storage);
    let mut first_run = SessionStore::hydrated(storage.clone());
    first_run.log_in(&api, "alice@example.com", "secret").await.unwrap();

    let second_run = SessionStore::hydrated(storage);
    assert_eq!(second_run.state(), first_run.state());
}

#[tokio::test]
async fn log_in_401_leaves_session_untouched_and_surfaces_message() {
    let storage = MemoryStore::new();
    let api = client(
        ScriptedTransport::new().reply(401, r#"{"message":"Invalid credentials"}"#),
        &storage,
    );
    let mut store = SessionStore::hydrated(storage.clone());

    let err = store.log_in(&api, "alice@example.com", "wrong").await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Api(ApiError::Status { status: 401, message: "Invalid credentials".to_owned() })
    );
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(store.state(), &SessionState::Unauthenticated);
    assert!(store.state().credential().is_none());
    assert_eq!(persisted(&storage), (None, None));
}

#[tokio::test]
async fn log_in_validation_failure_makes_no_request() {
    let storage = MemoryStore::new();
    let api = client(ScriptedTransport::new(), &storage);
    let mut store = SessionStore::hydrated(storage);

    let err = store.log_in(&api, "", "secret").await.unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::MissingIdentifier));
    assert!(api.transport().requests().is_empty());
    assert_eq!(store.state(), &SessionState::Unauthenticated);
}

#[tokio::test]
async fn log_in_storage_failure_leaves_session_untouched() {
    let storage = FailingStore::failing_on(USER_KEY);
    let api = ApiClient::new(
        "http://backend.test",
        ScriptedTransport::new().reply(200, alice_login_body()),
        storage.clone(),
    );
    let mut store = SessionStore::hydrated(storage.clone());

    let err = store.log_in(&api, "alice@example.com", "secret").await.unwrap_err();
    assert!(matches!(err, SessionError::Storage(_)));
    assert_eq!(store.state(), &SessionState::Unauthenticated);
    assert!(storage.inner.entries().is_empty());
}

#[tokio::test]
async fn authenticate_does_not_touch_storage() {
    let storage = MemoryStore::new();
    let api = client(ScriptedTransport::new().reply(200, alice_login_body()), &storage);
    let session = authenticate(&api, "alice@example.com", "secret").await.unwrap();
    assert_eq!(session.user, alice());
    assert!(storage.entries().is_empty());
}

// =============================================================
// Register
// =============================================================

#[tokio::test]
async fn register_success_does_not_authenticate() {
    let storage = MemoryStore::new();
    let api = client(ScriptedTransport::new().reply(201, r#"{"message":"User created"}"#), &storage);
    let store = SessionStore::hydrated(storage.clone());

    let ack = register(&api, "alice", "alice@example.com", "secret").await.unwrap();
    assert_eq!(ack["message"], "User created");
    assert_eq!(store.state(), &SessionState::Unauthenticated);
    assert!(storage.entries().is_empty());

    let requests = api.transport().requests();
    assert_eq!(requests[0].url, "http://backend.test/api/users/register");
    assert_eq!(
        requests[0].body,
        Some(serde_json::json!({ "username": "alice", "identifier": "alice@example.com", "password": "secret" }))
    );
}

#[tokio::test]
async fn register_failure_is_reported() {
    let api = client(
        ScriptedTransport::new().reply(409, r#"{"message":"Email already registered"}"#),
        &MemoryStore::new(),
    );
    let err = register(&api, "alice", "alice@example.com", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Email already registered");
}

#[tokio::test]
async fn register_validation_failure_makes_no_request() {
    let api = client(ScriptedTransport::new(), &MemoryStore::new());
    let err = register(&api, "  ", "alice@example.com", "secret").await.unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::MissingUsername));
    assert!(api.transport().requests().is_empty());
}

// =============================================================
// Logout
// =============================================================

#[tokio::test]
async fn log_out_clears_memory_storage_and_bearer() {
    let storage = MemoryStore::new();
    let api = client(
        ScriptedTransport::new().reply(200, alice_login_body()).reply(200, "[]").reply(200, "[]"),
        &storage,
    );
    let mut store = SessionStore::hydrated(storage.clone());
    store.log_in(&api, "alice@example.com", "secret").await.unwrap();

    api.get::<Vec<serde_json::Value>>("/api/projects").await.unwrap();
    store.log_out();
    api.get::<Vec<serde_json::Value>>("/api/projects").await.unwrap();

    let requests = api.transport().requests();
    assert_eq!(requests[1].header(AUTHORIZATION), Some("Bearer abc123"));
    assert_eq!(requests[2].header(AUTHORIZATION), None);
    assert_eq!(store.state(), &SessionState::Unauthenticated);
    assert_eq!(persisted(&storage), (None, None));
}

#[test]
fn log_out_twice_equals_once() {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, r#""abc123""#).unwrap();
    storage.set(USER_KEY, &serde_json::to_string(&alice()).unwrap()).unwrap();
    let mut once = SessionStore::hydrated(storage.clone());
    once.log_out();
    let after_once = (once.state().clone(), storage.entries());

    once.log_out();
    assert_eq!((once.state().clone(), storage.entries()), after_once);
    assert_eq!(once.state(), &SessionState::Unauthenticated);
    assert!(storage.entries().is_empty());
}
