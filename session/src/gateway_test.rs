use super::*;
use crate::storage::{MemoryStore, TOKEN_KEY};
use crate::testing::{BASE_URL, ScriptedTransport, client};

#[test]
fn url_joins_without_double_slashes() {
    let store = MemoryStore::new();
    let api = ApiClient::new("http://backend.test/", ScriptedTransport::new(), store);
    assert_eq!(api.base_url(), "http://backend.test");
    assert_eq!(api.url("/api/projects"), "http://backend.test/api/projects");
    assert_eq!(api.url("api/projects"), "http://backend.test/api/projects");
}

#[test]
fn empty_base_url_yields_root_relative_paths() {
    let api = ApiClient::new("", ScriptedTransport::new(), MemoryStore::new());
    assert_eq!(api.url("/api/projects"), "/api/projects");
}

#[test]
fn request_without_credential_has_no_authorization() {
    let api = client(ScriptedTransport::new(), &MemoryStore::new());
    let req = api.request(Method::Get, "/api/projects", None);
    assert_eq!(req.header(AUTHORIZATION), None);
    assert_eq!(req.header("content-type"), None);
}

#[test]
fn request_attaches_persisted_bearer() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, r#""abc123""#).unwrap();
    let api = client(ScriptedTransport::new(), &store);
    let req = api.request(Method::Post, "/api/projects", Some(serde_json::json!({})));
    assert_eq!(req.header("authorization"), Some("Bearer abc123"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[test]
fn request_skips_corrupt_persisted_token() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "{{garbage").unwrap();
    let api = client(ScriptedTransport::new(), &store);
    assert_eq!(api.request(Method::Get, "/api/projects", None).header(AUTHORIZATION), None);
}

#[tokio::test]
async fn credential_is_read_at_dispatch_time() {
    let store = MemoryStore::new();
    let api = client(ScriptedTransport::new().reply(200, "[]").reply(200, "[]"), &store);

    api.send(Method::Get, "/api/projects", None).await.unwrap();
    store.set(TOKEN_KEY, r#""late-token""#).unwrap();
    api.send(Method::Get, "/api/projects", None).await.unwrap();

    let requests = api.transport().requests();
    assert_eq!(requests[0].header(AUTHORIZATION), None);
    assert_eq!(requests[1].header(AUTHORIZATION), Some("Bearer late-token"));
    assert_eq!(requests[1].url, format!("{BASE_URL}/api/projects"));
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let api = client(
        ScriptedTransport::new().reply(401, r#"{"message":"Invalid credentials"}"#),
        &MemoryStore::new(),
    );
    let err = api.send(Method::Get, "/api/projects", None).await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 401, message: "Invalid credentials".to_owned() });
}

#[tokio::test]
async fn transport_failure_propagates_unchanged_without_retry() {
    let api = client(ScriptedTransport::new().fail("connection refused"), &MemoryStore::new());
    let err = api.send(Method::Get, "/api/projects", None).await.unwrap_err();
    assert_eq!(err, ApiError::Transport("connection refused".to_owned()));
    assert_eq!(api.transport().requests().len(), 1);
}

#[tokio::test]
async fn empty_and_text_bodies_are_tolerated() {
    let api = client(
        ScriptedTransport::new().reply(204, "").reply(201, "Created"),
        &MemoryStore::new(),
    );
    assert_eq!(api.send(Method::Delete, "/x", None).await.unwrap(), Value::Null);
    assert_eq!(
        api.send(Method::Post, "/x", None).await.unwrap(),
        Value::String("Created".to_owned())
    );
}

#[tokio::test]
async fn get_reports_decode_error_on_shape_mismatch() {
    let api = client(ScriptedTransport::new().reply(200, r#"{"oops":true}"#), &MemoryStore::new());
    let err = api.get::<Vec<String>>("/api/projects").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
