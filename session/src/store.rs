//! Session store: the single authoritative authentication state.
//!
//! ARCHITECTURE
//! ============
//! ```text
//!                 hydrate: nothing / partial / corrupt
//!   Initializing ─────────────────────────────────────► Unauthenticated
//!        │                                                │      ▲
//!        │ hydrate: token + user                 log_in  │      │ log_out
//!        ▼                                                ▼      │
//!   Authenticated ◄─────────────────────────────────── Authenticated
//! ```
//!
//! Persisted storage is read exactly once, at hydration. After that the
//! in-memory state is authoritative and every mutation writes through.
//!
//! The network half of sign-in lives in [`authenticate`], a free function
//! that never touches the store, so UI code can await it without holding a
//! borrow of shared state and then apply the result with
//! [`SessionStore::establish`].
//!
//! TRADE-OFFS
//! ==========
//! Hydration trusts whatever credential it finds; it does not ask the backend
//! whether the token is still valid. An expired token shows up later as a
//! 401 on an ordinary request.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde_json::Value;

use crate::error::{SessionError, StorageError};
use crate::gateway::{ApiClient, Transport};
use crate::storage::{self, KeyValueStore, Snapshot};
use crate::types::{Credential, LoginRequest, LoginResponse, RegisterRequest, User};
use crate::validate;

pub const LOGIN_PATH: &str = "/api/users/login";
pub const REGISTER_PATH: &str = "/api/users/register";

/// An authenticated identity paired with its credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub credential: Credential,
}

/// Where the client is in the authentication lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Persisted storage has not been read yet.
    #[default]
    Initializing,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    #[must_use]
    pub fn is_initializing(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            Self::Initializing | Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Authenticated(session) => Some(&session.credential),
            Self::Initializing | Self::Unauthenticated => None,
        }
    }
}

/// Owner of the session state and its persisted mirror.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    state: SessionState,
    storage: S,
}

impl<S: KeyValueStore + Default> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    /// A store in the `Initializing` state. Call [`SessionStore::hydrate`]
    /// before any guard decision is needed.
    pub fn new(storage: S) -> Self {
        Self { state: SessionState::Initializing, storage }
    }

    /// Construct and hydrate in one step.
    pub fn hydrated(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.hydrate();
        store
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Restore the session from persisted storage.
    ///
    /// Only acts while `Initializing`; later calls return the current state
    /// untouched. Partial or undecodable data resolves to `Unauthenticated`
    /// and the stale keys are removed.
    pub fn hydrate(&mut self) -> &SessionState {
        if !self.state.is_initializing() {
            return &self.state;
        }

        self.state = match storage::read_snapshot(&self.storage) {
            Snapshot::Empty => SessionState::Unauthenticated,
            Snapshot::Complete(credential, user) => {
                log::info!("restored session for {}", user.username);
                SessionState::Authenticated(Session { user, credential })
            }
            Snapshot::Invalid => {
                log::warn!("discarding partial or corrupt persisted session");
                storage::clear_snapshot(&self.storage);
                SessionState::Unauthenticated
            }
        };
        &self.state
    }

    /// Adopt a freshly authenticated session, writing it through to storage.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails; the in-memory state is
    /// left unchanged and no partial write remains.
    pub fn establish(&mut self, session: Session) -> Result<(), StorageError> {
        storage::write_snapshot(&self.storage, &session.credential, &session.user)?;
        log::info!("signed in as {}", session.user.username);
        self.state = SessionState::Authenticated(session);
        Ok(())
    }

    /// Forget the session in memory and in storage. Idempotent; never fails.
    pub fn log_out(&mut self) {
        storage::clear_snapshot(&self.storage);
        if let Some(user) = self.state.user() {
            log::info!("signed out {}", user.username);
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Authenticate against the backend and establish the session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] on validation, backend or storage failure;
    /// the session is unchanged in every failure case.
    pub async fn log_in<T, A>(&mut self, api: &ApiClient<T, A>, identifier: &str, password: &str) -> Result<User, SessionError>
    where
        T: Transport,
        A: KeyValueStore,
    {
        let session = authenticate(api, identifier, password).await?;
        let user = session.user.clone();
        self.establish(session)?;
        Ok(user)
    }
}

/// Exchange credentials for a [`Session`] without mutating any store.
///
/// # Errors
///
/// Returns [`SessionError::Validation`] for empty input (no request is made)
/// or [`SessionError::Api`] when the backend call fails.
pub async fn authenticate<T, S>(api: &ApiClient<T, S>, identifier: &str, password: &str) -> Result<Session, SessionError>
where
    T: Transport,
    S: KeyValueStore,
{
    let input = validate::login_input(identifier, password)?;
    let body = LoginRequest { identifier: &input.identifier, password: &input.password };
    let response: LoginResponse = api.post(LOGIN_PATH, &body).await.inspect_err(|e| {
        log::warn!("login failed: {e}");
    })?;
    Ok(Session { user: response.user, credential: response.token })
}

/// Create a backend account. Never touches session state.
///
/// # Errors
///
/// Returns [`SessionError::Validation`] for empty input (no request is made)
/// or [`SessionError::Api`] when the backend call fails.
pub async fn register<T, S>(api: &ApiClient<T, S>, username: &str, identifier: &str, password: &str) -> Result<Value, SessionError>
where
    T: Transport,
    S: KeyValueStore,
{
    let input = validate::register_input(username, identifier, password)?;
    let body = RegisterRequest {
        username: &input.username,
        identifier: &input.identifier,
        password: &input.password,
    };
    let ack: Value = api.post(REGISTER_PATH, &body).await.inspect_err(|e| {
        log::warn!("registration failed: {e}");
    })?;
    Ok(ack)
}
