//! Sign-in and registration page.
//!
//! DESIGN
//! ======
//! One form toggles between register (the default) and sign-in. The page
//! holds only form values, a busy flag and the last error; session changes
//! go through the shared store so the navbar and guards react immediately.
//!
//! ERROR HANDLING
//! ==============
//! Validation errors are shown without a request; backend errors show the
//! gateway's message. Either way the session is left untouched.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{ValidationError, validate};

use crate::state::auth::AuthState;

/// Where to go after a successful sign-in.
pub const AFTER_SIGN_IN_PATH: &str = "/projects";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Register,
    SignIn,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Register => Self::SignIn,
            Self::SignIn => Self::Register,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Register => "Create an Account",
            Self::SignIn => "Welcome Back",
        }
    }

    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Register => "Start managing your projects today",
            Self::SignIn => "Sign in to continue",
        }
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::SignIn => "Sign In",
        }
    }

    #[must_use]
    pub fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::Register, false) => "Register",
            (Self::Register, true) => "Creating account...",
            (Self::SignIn, false) => "Sign In",
            (Self::SignIn, true) => "Signing in...",
        }
    }

    /// Prompt text and link label for switching to the other mode.
    #[must_use]
    pub fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::Register => ("Already have an account?", "Sign in"),
            Self::SignIn => ("Don't have an account?", "Sign up"),
        }
    }
}

/// Check the fields the current mode needs before any request is made.
///
/// # Errors
///
/// Returns the first missing field for `mode`.
pub fn validate_for(mode: AuthMode, username: &str, identifier: &str, password: &str) -> Result<(), ValidationError> {
    match mode {
        AuthMode::Register => validate::register_input(username, identifier, password).map(|_| ()),
        AuthMode::SignIn => validate::login_input(identifier, password).map(|_| ()),
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let mode = RwSignal::new(AuthMode::default());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = mode.get_untracked();
        let username_value = username.get_untracked();
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();

        error.set(None);
        if let Err(e) = validate_for(current, &username_value, &email_value, &password_value) {
            error.set(Some(e.to_string()));
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let api = crate::net::api::api();
                match current {
                    AuthMode::SignIn => match session::authenticate(&api, &email_value, &password_value).await {
                        Ok(established) => {
                            let stored = auth.try_update(|store| store.establish(established)).unwrap_or(Ok(()));
                            match stored {
                                Ok(()) => navigate(AFTER_SIGN_IN_PATH, NavigateOptions::default()),
                                Err(e) => error.set(Some(e.to_string())),
                            }
                        }
                        Err(e) => error.set(Some(e.to_string())),
                    },
                    AuthMode::Register => {
                        match session::register(&api, &username_value, &email_value, &password_value).await {
                            Ok(_) => mode.set(AuthMode::SignIn),
                            Err(e) => error.set(Some(e.to_string())),
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, auth, username_value, email_value, password_value);
            busy.set(false);
        }
    };

    let on_switch = move |_: leptos::ev::MouseEvent| {
        error.set(None);
        mode.update(|m| *m = m.toggled());
    };

    view! {
        <div class="auth-page">
            <h1 class="auth-page__title">{move || mode.get().title()}</h1>
            <p class="auth-page__subtitle">{move || mode.get().subtitle()}</p>

            <Show when=move || error.get().is_some()>
                <div class="auth-page__error" role="alert">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <form class="auth-form" on:submit=on_submit>
                <h2 class="auth-form__heading">{move || mode.get().heading()}</h2>
                <Show when=move || mode.get() == AuthMode::Register>
                    <label class="auth-form__field">
                        <span class="auth-form__label">"Username"</span>
                        <input
                            class="auth-form__input"
                            type="text"
                            name="username"
                            placeholder="Enter your username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                </Show>
                <label class="auth-form__field">
                    <span class="auth-form__label">"Email"</span>
                    <input
                        class="auth-form__input"
                        type="email"
                        name="email"
                        placeholder="Enter your email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__field">
                    <span class="auth-form__label">"Password"</span>
                    <input
                        class="auth-form__input"
                        type="password"
                        name="password"
                        placeholder="Enter your password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                    {move || mode.get().submit_label(busy.get())}
                </button>
            </form>

            <p class="auth-page__switch">
                {move || mode.get().switch_prompt().0}
                " "
                <button class="auth-page__switch-link" type="button" on:click=on_switch>
                    {move || mode.get().switch_prompt().1}
                </button>
            </p>
        </div>
    }
}
