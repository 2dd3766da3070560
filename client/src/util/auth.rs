//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app root hydrates the session once; every guarded route applies the
//! same redirect behavior through [`install_guard_redirect`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::{GuardDecision, RedirectLatch, decide};

use crate::state::auth::AuthState;

/// Current guard decision for the session signal (tracked read).
pub fn guard_decision(auth: RwSignal<AuthState>) -> GuardDecision {
    auth.with(|store| decide(store.state()))
}

/// Read persisted storage into the session once the browser takes over.
///
/// Effects never run during server rendering, so the server always renders
/// the `Initializing` state and hydration markup matches.
pub fn install_hydration(auth: RwSignal<AuthState>) {
    Effect::new(move || {
        auth.update(|store| {
            store.hydrate();
        });
    });
}

/// Redirect to the sign-in view when the session resolves to unauthenticated.
///
/// One latch per call, so a guard mounted for a navigation redirects at most
/// once no matter how often the session signal changes.
pub fn install_guard_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let mut latch = RedirectLatch::default();
    Effect::new(move || {
        if let Some(path) = latch.observe(guard_decision(auth)) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
