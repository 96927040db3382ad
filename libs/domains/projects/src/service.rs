//! Project Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectInput};
use crate::repository::ProjectRepository;

/// Project service providing the CRUD operations.
///
/// Validates input and issues exactly one write per mutation; no
/// retries, no idempotency keys. A repeated create always inserts a
/// new record.
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all projects.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> ProjectResult<Vec<Project>> {
        self.repository.find_all().await
    }

    /// Get a project by id.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: ObjectId) -> ProjectResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// Create a new project.
    #[instrument(skip(self, input), fields(project_name = %input.project_name))]
    pub async fn create_project(&self, input: ProjectInput) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        let project = Project::new(input);
        self.repository.insert(&project).await?;
        Ok(project)
    }

    /// Full-field replace of an existing project. Only `id` and
    /// `created_at` are carried over from the stored record.
    #[instrument(skip(self, input))]
    pub async fn update_project(&self, id: ObjectId, input: ProjectInput) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        let updated = existing.replaced_with(input);
        if !self.repository.replace(&updated).await? {
            // Deleted between the read and the write
            return Err(ProjectError::NotFound(id));
        }
        Ok(updated)
    }

    /// Delete a project.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: ObjectId) -> ProjectResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProjectError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ProjectRepository> Clone for ProjectService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
