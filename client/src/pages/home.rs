//! Landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

const FEATURES: [(&str, &str); 3] = [
    ("Projects", "Organize your work into projects with descriptions"),
    ("Tasks", "Add tasks and track their progress"),
    ("Secure", "Your data is protected with JWT authentication"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let signed_in = move || auth.with(|store| store.state().is_authenticated());

    view! {
        <div class="home-page">
            <h1 class="home-page__title">"Welcome to ProjectHub"</h1>
            <p class="home-page__lead">
                "Organize your projects and tasks in one place. Stay productive and never miss a deadline."
            </p>
            <div class="home-page__actions">
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <a class="home-page__cta" href="/auth">"Get Started"</a>
                        <a class="home-page__cta home-page__cta--secondary" href="/auth">"Sign In"</a>
                    }
                >
                    <a class="home-page__cta" href="/projects">"View My Projects"</a>
                </Show>
            </div>
            <div class="home-page__features">
                {FEATURES
                    .iter()
                    .map(|(title, body)| view! {
                        <div class="feature-card">
                            <h3 class="feature-card__title">{*title}</h3>
                            <p class="feature-card__body">{*body}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
