//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. Provided once at the app root as
//! `RwSignal<AuthState>`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{SessionState, SessionStore};

use crate::util::storage::LocalStorage;

/// The browser session store, mirrored to `localStorage`.
pub type AuthState = SessionStore<LocalStorage>;

/// What the navbar should show for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavIdentity {
    /// Hydration has not finished; show neither sign-in nor sign-out.
    Unknown,
    SignedOut,
    SignedIn { username: String },
}

#[must_use]
pub fn nav_identity(state: &SessionState) -> NavIdentity {
    match state {
        SessionState::Initializing => NavIdentity::Unknown,
        SessionState::Unauthenticated => NavIdentity::SignedOut,
        SessionState::Authenticated(session) => NavIdentity::SignedIn { username: session.user.username.clone() },
    }
}
