use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProjectResult;
use crate::models::Project;

/// Repository trait for Project persistence.
///
/// Exactly the five storage operations the handlers need; each maps to
/// a single storage call in the MongoDB implementation. The in-memory
/// implementation backs handler and service tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Fetch every project, no filter, no pagination.
    async fn find_all(&self) -> ProjectResult<Vec<Project>>;

    /// Fetch one project by id.
    async fn find_by_id(&self, id: ObjectId) -> ProjectResult<Option<Project>>;

    /// Insert a new project. Always inserts; never deduplicates.
    async fn insert(&self, project: &Project) -> ProjectResult<()>;

    /// Replace the stored document with the same id. Returns false if
    /// no document matched.
    async fn replace(&self, project: &Project) -> ProjectResult<bool>;

    /// Delete by id. Returns false if nothing was deleted.
    async fn delete(&self, id: ObjectId) -> ProjectResult<bool>;
}
