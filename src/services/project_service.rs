//! User-project CRUD service.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::UserProject;
use crate::domain::ports::ProjectStore;

pub struct ProjectService<P: ProjectStore> {
    store: Arc<P>,
}

impl<P: ProjectStore> ProjectService<P> {
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Persist a new project.
    pub async fn create_project(&self, project: UserProject) -> ServiceResult<UserProject> {
        project.validate().map_err(ServiceError::InvalidArgument)?;
        self.store.create(&project).await
    }

    /// Get a project by id.
    pub async fn get_project(&self, id: i64) -> ServiceResult<Option<UserProject>> {
        self.store.get(id).await
    }

    /// All projects.
    pub async fn list_projects(&self) -> ServiceResult<Vec<UserProject>> {
        self.store.list_all().await
    }

    /// Projects owned by a user.
    pub async fn projects_for_user(&self, user_id: i64) -> ServiceResult<Vec<UserProject>> {
        self.store.list_by_user(user_id).await
    }

    /// Projects whose name contains `pattern`, case-insensitively.
    pub async fn search_projects(&self, pattern: &str) -> ServiceResult<Vec<UserProject>> {
        if pattern.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "search pattern must not be empty".to_string(),
            ));
        }
        self.store.find_by_name(pattern).await
    }

    /// Update an existing project, bumping its `updated_at`.
    pub async fn update_project(&self, mut project: UserProject) -> ServiceResult<UserProject> {
        project.validate().map_err(ServiceError::InvalidArgument)?;
        project.updated_at = Utc::now();
        self.store.update(&project).await?;
        Ok(project)
    }

    /// Delete a project by id.
    pub async fn delete_project(&self, id: i64) -> ServiceResult<()> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteProjectStore};

    async fn setup_service() -> ProjectService<SqliteProjectStore> {
        let pool = create_migrated_test_pool().await.unwrap();
        ProjectService::new(Arc::new(SqliteProjectStore::new(pool)))
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = setup_service().await;
        let err = service
            .create_project(UserProject::new("  ", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let service = setup_service().await;

        let created = service
            .create_project(UserProject::new("billing-api", 7))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let mut renamed = created.clone();
        renamed.name = "billing-service".to_string();
        let updated = service.update_project(renamed).await.unwrap();
        assert!(updated.updated_at >= created.updated_at);

        let fetched = service.get_project(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "billing-service");

        service.delete_project(id).await.unwrap();
        assert!(service.get_project(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_project() {
        let service = setup_service().await;

        let mut phantom = UserProject::new("ghost", 1);
        phantom.id = Some(404);

        let err = service.update_project(phantom).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProjectNotFound(404)));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_pattern() {
        let service = setup_service().await;
        let err = service.search_projects("  ").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }
}
