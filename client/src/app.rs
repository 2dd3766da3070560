//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::require_auth::RequireAuth;
use crate::pages::{
    auth::AuthPage, home::HomePage, project_details::ProjectDetailsPage, projects::ProjectsPage,
};
use crate::state::auth::AuthState;
use crate::util::auth::install_hydration;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single session context and wires client-side routing. Protected
/// routes are wrapped in [`RequireAuth`], which is mounted per navigation.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    install_hydration(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/projecthub.css"/>
        <Title text="ProjectHub"/>

        <Router>
            <div class="app">
                <Navbar/>
                <main class="app__main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("auth") view=AuthPage/>
                        <Route
                            path=StaticSegment("projects")
                            view=|| view! { <RequireAuth><ProjectsPage/></RequireAuth> }
                        />
                        <Route
                            path=(StaticSegment("projects"), ParamSegment("project_id"))
                            view=|| view! { <RequireAuth><ProjectDetailsPage/></RequireAuth> }
                        />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
