//! Top navigation bar.
//!
//! Shows the signed-in username with a log-out action, or a sign-in link.
//! While the session is still hydrating neither is shown, so the bar does
//! not flash "Sign in" for a user who is about to be restored.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthState, NavIdentity, nav_identity};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let identity = Memo::new(move |_| auth.with(|store| nav_identity(store.state())));

    let on_logout = move |_: leptos::ev::MouseEvent| {
        auth.update(|store| store.log_out());
        navigate("/", NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"ProjectHub"</a>
            <div class="navbar__links">
                <a class="navbar__link" href="/projects">"Projects"</a>
                {move || match identity.get() {
                    NavIdentity::Unknown => ().into_any(),
                    NavIdentity::SignedOut => view! {
                        <a class="navbar__link navbar__link--cta" href="/auth">"Sign in"</a>
                    }
                    .into_any(),
                    NavIdentity::SignedIn { username } => {
                        let on_logout = on_logout.clone();
                        view! {
                            <span class="navbar__user">{username}</span>
                            <button class="navbar__logout" on:click=on_logout>"Log out"</button>
                        }
                        .into_any()
                    }
                }}
            </div>
        </nav>
    }
}
