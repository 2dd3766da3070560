//! API gateway: one configured sender for every backend call.
//!
//! ARCHITECTURE
//! ============
//! [`ApiClient`] joins paths onto a fixed base URL and, right before
//! dispatch, reads the persisted credential and attaches it as a bearer
//! `Authorization` header. The HTTP stack sits behind [`Transport`] so the
//! browser (`gloo-net`), the CLI (`reqwest`) and tests can each supply one.
//!
//! There is no retry and no timeout policy beyond the transport's default;
//! failures reach the caller unchanged.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::storage::{self, KeyValueStore};

/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP methods used by the backend contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outgoing request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the gateway: status plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP stack seam.
///
/// `?Send` because browser fetch futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Dispatch `request` and return whatever the server answered.
    ///
    /// Non-2xx statuses are *not* errors at this layer; only failures to get
    /// a response at all are.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Configured request sender bound to a base URL and a credential store.
#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    storage: S,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Build a client. An empty base URL means same-origin relative paths.
    pub fn new(base_url: impl Into<String>, transport: T, storage: S) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        Self { base_url, transport, storage }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Join `path` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }

    /// Resolve a request, attaching the persisted credential if there is one.
    #[must_use]
    pub fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiRequest {
        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        if let Some(credential) = storage::read_credential(&self.storage) {
            headers.push((AUTHORIZATION.to_owned(), credential.bearer()));
        }
        ApiRequest { method, url: self.url(path), headers, body }
    }

    /// Send a request and return the JSON body.
    ///
    /// An empty 2xx body becomes `Value::Null`; a non-JSON 2xx body becomes
    /// `Value::String`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response arrived and
    /// [`ApiError::Status`] for non-2xx responses.
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let request = self.request(method, path, body);
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::debug!("{method} {path} -> {}", response.status);
            return Err(ApiError::from_response(response.status, &response.body));
        }

        let text = response.body.trim();
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned())))
    }

    /// `GET` and decode the response.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`ApiError::Decode`] on a shape mismatch.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let value = self.send(Method::Get, path, None).await?;
        decode(value)
    }

    /// `POST` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`ApiError::Decode`] on a shape mismatch.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Transport(format!("request body encode failed: {e}")))?;
        let value = self.send(Method::Post, path, Some(body)).await?;
        decode(value)
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
