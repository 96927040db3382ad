//! MongoDB implementation of ProjectRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::ProjectResult;
use crate::models::Project;
use crate::repository::ProjectRepository;

/// MongoDB implementation of the ProjectRepository.
///
/// Works against a typed `Collection<Project>`; the serde renames on
/// the entity keep the stored documents in the historical layout.
pub struct MongoProjectRepository {
    collection: Collection<Project>,
}

impl MongoProjectRepository {
    /// Create a repository over the default `projects` collection.
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Project>("projects");
        Self { collection }
    }

    /// Create a repository with a custom collection name.
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Project>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations.
    pub fn collection(&self) -> &Collection<Project> {
        &self.collection
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProjectResult<Vec<Project>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;
        let projects: Vec<Project> = cursor.try_collect().await?;
        Ok(projects)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ProjectResult<Option<Project>> {
        let project = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(project)
    }

    #[instrument(skip(self, project), fields(project_id = %project.id))]
    async fn insert(&self, project: &Project) -> ProjectResult<()> {
        self.collection.insert_one(project).await?;

        tracing::info!(project_id = %project.id, "Project created successfully");
        Ok(())
    }

    #[instrument(skip(self, project), fields(project_id = %project.id))]
    async fn replace(&self, project: &Project) -> ProjectResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": project.id }, project)
            .await?;

        let replaced = result.matched_count > 0;
        if replaced {
            tracing::info!(project_id = %project.id, "Project replaced successfully");
        }
        Ok(replaced)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProjectResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(project_id = %id, "Project deleted successfully");
        }
        Ok(deleted)
    }
}
