//! Route guard wrapper for protected pages.
//!
//! Renders nothing while the session hydrates, redirects once to the sign-in
//! view when there is no session, and renders its children otherwise. The
//! component is remounted on every navigation into a protected route, so
//! each navigation gets a fresh redirect latch.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::GuardDecision;

use crate::state::auth::AuthState;
use crate::util::auth::{guard_decision, install_guard_redirect};

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_guard_redirect(auth, use_navigate());

    view! {
        <Show when=move || guard_decision(auth) == GuardDecision::Render>
            {children()}
        </Show>
    }
}
