//! Project-list and project-detail page state.
//!
//! DESIGN
//! ======
//! Separating list state from detail state keeps the inventory view and the
//! task board independent; each page owns its own signal. Form drafts live
//! here too so validation is testable without a browser.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use session::validate;
use session::{ApiError, NewProject, NewTask, Project, Task, TaskStatus, ValidationError};

pub const PROJECT_LOAD_FAILED: &str = "Failed to load project";

/// State of the project list page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectsState {
    pub items: Vec<Project>,
    pub loading: bool,
    pub creating: bool,
    pub error: Option<String>,
}

impl ProjectsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Project>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn begin_create(&mut self) {
        self.creating = true;
        self.error = None;
    }

    /// Apply a create result; returns `true` when the form should reset.
    pub fn finish_create(&mut self, result: Result<Project, ApiError>) -> bool {
        self.creating = false;
        match result {
            Ok(project) => {
                self.items.push(project);
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

/// Create-project form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
}

impl ProjectDraft {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is blank.
    pub fn to_new_project(&self) -> Result<NewProject, ValidationError> {
        Ok(NewProject {
            name: validate::required("Project name", &self.name)?,
            description: self.description.trim().to_owned(),
        })
    }
}

/// State of the project detail page.
///
/// `generation` counts loads. Async results carry the generation they were
/// started under and are dropped once a newer load has begun, so a late
/// response for a previous visit never lands on the current one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDetailState {
    pub project: Option<Project>,
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub creating: bool,
    pub error: Option<String>,
    pub task_error: Option<String>,
    pub generation: u64,
}

impl ProjectDetailState {
    /// Reset for a fresh load and return its generation.
    pub fn begin_load(&mut self) -> u64 {
        let generation = self.generation.wrapping_add(1);
        *self = Self { loading: true, generation, ..Self::default() };
        generation
    }

    /// A failed project fetch is a page error; a failed task fetch only
    /// leaves the task list empty. Returns `false` when `generation` is stale.
    pub fn finish_load(
        &mut self,
        generation: u64,
        project: Result<Project, ApiError>,
        tasks: Result<Vec<Task>, ApiError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!("dropping project load {generation}, current is {}", self.generation);
            return false;
        }
        self.loading = false;
        match project {
            Ok(project) => self.project = Some(project),
            Err(e) => {
                log::warn!("project fetch failed: {e}");
                self.error = Some(PROJECT_LOAD_FAILED.to_owned());
            }
        }
        match tasks {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => log::warn!("task fetch failed: {e}"),
        }
        true
    }

    /// Mark a task submission in flight. Returns the current generation, or
    /// `None` while another submission is still pending.
    pub fn begin_create_task(&mut self) -> Option<u64> {
        if self.creating {
            return None;
        }
        self.creating = true;
        self.task_error = None;
        Some(self.generation)
    }

    /// Apply a create-task result; returns `true` when the form should reset.
    /// Results from an earlier generation are dropped.
    pub fn finish_create_task(&mut self, generation: u64, result: Result<Task, ApiError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.creating = false;
        match result {
            Ok(task) => {
                self.task_error = None;
                self.tasks.push(task);
                true
            }
            Err(e) => {
                self.task_error = Some(e.to_string());
                false
            }
        }
    }

    #[must_use]
    pub fn tasks_heading(&self) -> String {
        format!("Tasks ({})", self.tasks.len())
    }
}

/// Create-task form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl TaskDraft {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the title or description is blank.
    pub fn to_new_task(&self) -> Result<NewTask, ValidationError> {
        Ok(NewTask {
            title: validate::required("Title", &self.title)?,
            description: validate::required("Description", &self.description)?,
            status: self.status,
        })
    }
}
