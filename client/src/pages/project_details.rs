//! Project detail page: the project header, its tasks and the add-task form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route changes between two projects do not unmount this component, so the
//! load is keyed on the `project_id` route param and reruns when it changes.
//! Leaving the route disposes the page signals while fetches may still be in
//! flight, so async completions only touch them through `try_update`.

#[cfg(test)]
#[path = "project_details_test.rs"]
mod project_details_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use session::{ApiError, Project, Task, TaskStatus};

use crate::components::task_card::TaskCard;
use crate::state::projects::{ProjectDetailState, TaskDraft};

#[component]
pub fn ProjectDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let detail = RwSignal::new(ProjectDetailState::default());
    let draft = RwSignal::new(TaskDraft::default());
    let project_id = Memo::new(move |_| params.read().get("project_id").unwrap_or_default());

    Effect::new(move || {
        let id = project_id.get();
        let Some(generation) = detail.try_update(ProjectDetailState::begin_load) else {
            return;
        };
        draft.set(TaskDraft::default());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::api();
            let project = api.get_project(&id).await;
            let tasks = api.list_tasks(&id).await;
            apply_detail_load(detail, generation, project, tasks);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, generation);
        }
    });

    let on_add_task = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let new_task = match draft.with_untracked(TaskDraft::to_new_task) {
            Ok(t) => t,
            Err(e) => {
                detail.update(|s| s.task_error = Some(e.to_string()));
                return;
            }
        };
        let Some(generation) = detail.try_update(ProjectDetailState::begin_create_task).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let id = project_id.get_untracked();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::api().create_task(&id, &new_task).await;
                apply_task_created(detail, draft, generation, result);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (new_task, generation);
            detail.update(|s| s.creating = false);
        }
    };

    let back_link = || view! { <a class="project-details__back" href="/projects">"← Back to Projects"</a> };

    view! {
        <div class="project-details">
            {move || {
                if detail.with(|s| s.loading) {
                    return view! { <p class="project-details__status">"Loading project..."</p> }.into_any();
                }
                if let Some(error) = detail.with(|s| s.error.clone()) {
                    return view! {
                        <div class="project-details__error">
                            <p>{error}</p>
                            {back_link()}
                        </div>
                    }
                    .into_any();
                }
                let name = detail.with(|s| s.project.as_ref().map(|p| p.name.clone()).unwrap_or_default());
                view! {
                    {back_link()}
                    <h1 class="project-details__title">{name}</h1>
                }
                .into_any()
            }}

            <Show when=move || detail.with(|s| s.project.is_some())>
                <section class="task-form">
                    <h2 class="task-form__heading">"Add New Task"</h2>
                    <form class="task-form__form" on:submit=on_add_task>
                        <input
                            class="task-form__input"
                            type="text"
                            placeholder="Task title"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                        />
                        <textarea
                            class="task-form__input"
                            placeholder="Task description"
                            rows="3"
                            prop:value=move || draft.with(|d| d.description.clone())
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                        <select
                            class="task-form__select"
                            prop:value=move || draft.with(|d| d.status.as_str())
                            on:change=move |ev| {
                                if let Some(status) = TaskStatus::parse(&event_target_value(&ev)) {
                                    draft.update(|d| d.status = status);
                                }
                            }
                        >
                            {TaskStatus::ALL
                                .into_iter()
                                .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                .collect_view()}
                        </select>
                        <button
                            class="task-form__submit"
                            type="submit"
                            disabled=move || detail.with(|s| s.creating)
                        >
                            {move || if detail.with(|s| s.creating) { "Adding..." } else { "Add Task" }}
                        </button>
                    </form>
                    <Show when=move || detail.with(|s| s.task_error.is_some())>
                        <p class="task-form__error">{move || detail.with(|s| s.task_error.clone().unwrap_or_default())}</p>
                    </Show>
                </section>

                <section class="task-list">
                    <h2 class="task-list__heading">{move || detail.with(ProjectDetailState::tasks_heading)}</h2>
                    <Show
                        when=move || detail.with(|s| !s.tasks.is_empty())
                        fallback=|| view! { <p class="task-list__empty">"No tasks yet. Create your first task!"</p> }
                    >
                        <ul class="task-list__items">
                            {move || {
                                detail
                                    .with(|s| s.tasks.clone())
                                    .into_iter()
                                    .map(|task| view! { <TaskCard task=task/> })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>
                </section>
            </Show>
        </div>
    }
}

/// Land a detail fetch on the page state. Returns `false` when the page is
/// gone or a newer load has started since `generation`.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) fn apply_detail_load(
    detail: RwSignal<ProjectDetailState>,
    generation: u64,
    project: Result<Project, ApiError>,
    tasks: Result<Vec<Task>, ApiError>,
) -> bool {
    detail.try_update(|s| s.finish_load(generation, project, tasks)).unwrap_or(false)
}

/// Land a create-task result and clear the form on success. Returns whether
/// the form was reset.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) fn apply_task_created(
    detail: RwSignal<ProjectDetailState>,
    draft: RwSignal<TaskDraft>,
    generation: u64,
    result: Result<Task, ApiError>,
) -> bool {
    let reset = detail.try_update(|s| s.finish_create_task(generation, result)).unwrap_or(false);
    if reset {
        draft.try_set(TaskDraft::default());
    }
    reset
}
