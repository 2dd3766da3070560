//! Card for one task on the project detail page.

#[cfg(test)]
#[path = "task_card_test.rs"]
mod task_card_test;

use leptos::prelude::*;
use session::{Task, TaskStatus};

/// BEM modifier class for a status badge.
#[must_use]
pub fn status_badge_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "task-card__status task-card__status--todo",
        TaskStatus::InProgress => "task-card__status task-card__status--in-progress",
        TaskStatus::Done => "task-card__status task-card__status--done",
    }
}

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    view! {
        <li class="task-card">
            <div class="task-card__header">
                <span class="task-card__title">{task.title}</span>
                <span class=status_badge_class(task.status)>{task.status.label()}</span>
            </div>
            <p class="task-card__description">{task.description}</p>
        </li>
    }
}
