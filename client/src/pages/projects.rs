//! Project list page with the create-project form.

use leptos::prelude::*;

use crate::components::project_card::ProjectCard;
use crate::state::projects::{ProjectDraft, ProjectsState};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let projects = RwSignal::new(ProjectsState::default());
    let draft = RwSignal::new(ProjectDraft::default());

    // Initial load; the guard only mounts this page once signed in.
    projects.update(ProjectsState::begin_load);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::api().list_projects().await;
        if let Err(e) = &result {
            log::warn!("project list failed: {e}");
        }
        projects.update(|s| s.finish_load(result));
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if projects.with_untracked(|s| s.creating) {
            return;
        }
        let new_project = match draft.with_untracked(ProjectDraft::to_new_project) {
            Ok(p) => p,
            Err(e) => {
                projects.update(|s| s.error = Some(e.to_string()));
                return;
            }
        };
        projects.update(ProjectsState::begin_create);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::api().create_project(&new_project).await;
            let mut reset = false;
            projects.update(|s| reset = s.finish_create(result));
            if reset {
                draft.set(ProjectDraft::default());
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = new_project;
            projects.update(|s| s.creating = false);
        }
    };

    view! {
        <div class="projects-page">
            <h1 class="projects-page__title">"My Projects"</h1>

            <form class="project-form" on:submit=on_create>
                <label class="project-form__field">
                    <span class="project-form__label">"Project Name"</span>
                    <input
                        class="project-form__input"
                        type="text"
                        name="project-name"
                        prop:value=move || draft.with(|d| d.name.clone())
                        on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                    />
                </label>
                <label class="project-form__field">
                    <span class="project-form__label">"Project Description"</span>
                    <input
                        class="project-form__input"
                        type="text"
                        name="project-description"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    />
                </label>
                <button class="project-form__submit" type="submit" disabled=move || projects.with(|s| s.creating)>
                    "Create Project"
                </button>
            </form>

            <Show when=move || projects.with(|s| s.loading)>
                <p class="projects-page__status">"Loading projects..."</p>
            </Show>
            <Show when=move || projects.with(|s| s.error.is_some())>
                <p class="projects-page__error">{move || projects.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>

            <div class="projects-page__grid">
                {move || {
                    projects
                        .with(|s| s.items.clone())
                        .into_iter()
                        .map(|project| view! { <ProjectCard project=project/> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
