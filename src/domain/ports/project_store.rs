//! User-project store port.

use async_trait::async_trait;

use crate::domain::errors::ServiceResult;
use crate::domain::models::UserProject;

/// Persistence interface for user projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new project, returning it with its assigned id.
    async fn create(&self, project: &UserProject) -> ServiceResult<UserProject>;

    /// Get a project by id.
    async fn get(&self, id: i64) -> ServiceResult<Option<UserProject>>;

    /// All projects, unfiltered.
    async fn list_all(&self) -> ServiceResult<Vec<UserProject>>;

    /// Projects owned by a user.
    async fn list_by_user(&self, user_id: i64) -> ServiceResult<Vec<UserProject>>;

    /// Projects whose name contains `pattern`, case-insensitively.
    async fn find_by_name(&self, pattern: &str) -> ServiceResult<Vec<UserProject>>;

    /// Update an existing project. Fails with `ProjectNotFound` when the
    /// id does not exist.
    async fn update(&self, project: &UserProject) -> ServiceResult<()>;

    /// Delete a project by id. Fails with `ProjectNotFound` when the id
    /// does not exist.
    async fn delete(&self, id: i64) -> ServiceResult<()>;
}
