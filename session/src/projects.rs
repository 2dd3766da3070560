//! Typed project and task endpoints on top of [`ApiClient`].

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use crate::error::ApiError;
use crate::gateway::{ApiClient, Transport};
use crate::storage::KeyValueStore;
use crate::types::{NewProject, NewTask, Project, Task};

pub const PROJECTS_PATH: &str = "/api/projects";

#[must_use]
pub fn project_path(project_id: &str) -> String {
    format!("{PROJECTS_PATH}/{project_id}")
}

#[must_use]
pub fn tasks_path(project_id: &str) -> String {
    format!("{PROJECTS_PATH}/{project_id}/tasks")
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// `GET /api/projects`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the gateway.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get(PROJECTS_PATH).await
    }

    /// `POST /api/projects`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the gateway.
    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        self.post(PROJECTS_PATH, project).await
    }

    /// `GET /api/projects/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the gateway.
    pub async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        self.get(&project_path(project_id)).await
    }

    /// `GET /api/projects/{id}/tasks`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the gateway.
    pub async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, ApiError> {
        self.get(&tasks_path(project_id)).await
    }

    /// `POST /api/projects/{id}/tasks`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the gateway.
    pub async fn create_task(&self, project_id: &str, task: &NewTask) -> Result<Task, ApiError> {
        self.post(&tasks_path(project_id), task).await
    }
}
