//! Card for one project in the project list.

use leptos::prelude::*;
use session::Project;

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let href = format!("/projects/{}", project.id);
    let description = project.description;
    let has_description = !description.is_empty();

    view! {
        <a class="project-card" href=href>
            <span class="project-card__name">{project.name}</span>
            <Show when=move || has_description>
                <span class="project-card__description">{description.clone()}</span>
            </Show>
            <span class="project-card__open">"Open project →"</span>
        </a>
    }
}
