//! In-memory implementation of ProjectRepository.
//!
//! Backs handler and service tests; no MongoDB instance required.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{ProjectError, ProjectResult};
use crate::models::Project;
use crate::repository::ProjectRepository;

/// In-memory fake with the same semantics as the MongoDB repository:
/// insert never deduplicates, replace and delete report whether a
/// document matched.
#[derive(Default)]
pub struct MemoryProjectRepository {
    projects: Mutex<HashMap<ObjectId, Project>>,
}

impl MemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ProjectResult<std::sync::MutexGuard<'_, HashMap<ObjectId, Project>>> {
        self.projects
            .lock()
            .map_err(|_| ProjectError::Internal("repository lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn find_all(&self) -> ProjectResult<Vec<Project>> {
        let projects = self.lock()?;
        Ok(projects.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> ProjectResult<Option<Project>> {
        let projects = self.lock()?;
        Ok(projects.get(&id).cloned())
    }

    async fn insert(&self, project: &Project) -> ProjectResult<()> {
        let mut projects = self.lock()?;
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn replace(&self, project: &Project) -> ProjectResult<bool> {
        let mut projects = self.lock()?;
        match projects.get_mut(&project.id) {
            Some(stored) => {
                *stored = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> ProjectResult<bool> {
        let mut projects = self.lock()?;
        Ok(projects.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectInput;

    fn sample_project(name: &str) -> Project {
        let input: ProjectInput = serde_json::from_value(serde_json::json!({
            "project_name": name,
            "project_description": "desc",
            "jobs_done": "work",
            "project_price": 100.0,
            "start_date": "2023-01-01",
            "end_date": "2023-06-01"
        }))
        .unwrap();
        Project::new(input)
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = MemoryProjectRepository::new();
        let project = sample_project("Alpha");

        repo.insert(&project).await.unwrap();

        let found = repo.find_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Alpha");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_missing_returns_false() {
        let repo = MemoryProjectRepository::new();
        let project = sample_project("Alpha");
        assert!(!repo.replace(&project).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let repo = MemoryProjectRepository::new();
        let project = sample_project("Alpha");
        repo.insert(&project).await.unwrap();

        assert!(repo.delete(project.id).await.unwrap());
        assert!(repo.find_by_id(project.id).await.unwrap().is_none());
        assert!(!repo.delete(project.id).await.unwrap());
    }
}
