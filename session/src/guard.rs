//! Route guard for protected views.
//!
//! The decision is a pure function of [`SessionState`]; callers evaluate it
//! on every navigation rather than caching it, since a logout can happen
//! between navigations.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::store::SessionState;

/// Path of the sign-in view unauthenticated users are sent to.
pub const SIGN_IN_PATH: &str = "/auth";

/// What a protected route should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hydration has not finished: render nothing and do not redirect.
    Pending,
    /// Send the user to the sign-in view; never render the protected view.
    Redirect(&'static str),
    /// Render the requested view.
    Render,
}

/// Map the session state to a guard decision.
#[must_use]
pub fn decide(state: &SessionState) -> GuardDecision {
    match state {
        SessionState::Initializing => GuardDecision::Pending,
        SessionState::Unauthenticated => GuardDecision::Redirect(SIGN_IN_PATH),
        SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

/// Per-navigation latch so a reactive guard redirects at most once.
///
/// Reactive UIs may re-read the session several times during a single
/// navigation; only the first `Redirect` observed is acted on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedirectLatch {
    fired: bool,
}

impl RedirectLatch {
    /// Returns the redirect target the first time `decision` is a redirect,
    /// `None` otherwise.
    pub fn observe(&mut self, decision: GuardDecision) -> Option<&'static str> {
        match decision {
            GuardDecision::Redirect(path) if !self.fired => {
                self.fired = true;
                Some(path)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
