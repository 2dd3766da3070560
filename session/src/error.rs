//! Error taxonomy for session and gateway operations.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal to the application. Backend and transport failures
//! bubble to the initiating view as displayable text, validation failures are
//! raised before any network round-trip, and malformed persisted state is not
//! an error at all (hydration treats it as "no session").

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure talking to the backend API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (network down, CORS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// Prefers a `message` or `error` string field from a JSON payload, then
    /// the raw body text, then a generic status line.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("request failed with status code {status}"));
        Self::Status { status, message }
    }

    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .filter(|text| !text.trim().is_empty())
            .map(str::to_owned),
        Ok(serde_json::Value::String(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_owned()),
    }
}

/// Failure reading or writing persisted session storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (no `window`, storage disabled, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the read or write.
    #[error("storage {op} failed for `{key}`: {reason}")]
    Io { op: &'static str, key: String, reason: String },
}

/// A required form field was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username is required.")]
    MissingUsername,
    #[error("Email is required.")]
    MissingIdentifier,
    #[error("Password is required.")]
    MissingPassword,
    #[error("{0} is required.")]
    MissingField(&'static str),
}

/// Any failure surfaced by a session operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
