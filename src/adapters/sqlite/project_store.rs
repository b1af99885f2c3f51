//! SQLite implementation of the `ProjectStore`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::UserProject;
use crate::domain::ports::ProjectStore;

#[derive(Clone)]
pub struct SqliteProjectStore {
    pool: SqlitePool,
}

impl SqliteProjectStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn create(&self, project: &UserProject) -> ServiceResult<UserProject> {
        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO user_projects (name, description, user_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.user_id)
        .bind(project.created_at.to_rfc3339())
        .bind(project.updated_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(UserProject {
            id: Some(id),
            ..project.clone()
        })
    }

    async fn get(&self, id: i64) -> ServiceResult<Option<UserProject>> {
        let row: Option<ProjectRow> = sqlx::query_as("SELECT * FROM user_projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn list_all(&self) -> ServiceResult<Vec<UserProject>> {
        let rows: Vec<ProjectRow> = sqlx::query_as("SELECT * FROM user_projects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn list_by_user(&self, user_id: i64) -> ServiceResult<Vec<UserProject>> {
        let rows: Vec<ProjectRow> =
            sqlx::query_as("SELECT * FROM user_projects WHERE user_id = ? ORDER BY id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn find_by_name(&self, pattern: &str) -> ServiceResult<Vec<UserProject>> {
        // LIKE is case-insensitive for ASCII in SQLite.
        let rows: Vec<ProjectRow> =
            sqlx::query_as("SELECT * FROM user_projects WHERE name LIKE ? ORDER BY id")
                .bind(format!("%{pattern}%"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn update(&self, project: &UserProject) -> ServiceResult<()> {
        let id = project
            .id
            .ok_or_else(|| ServiceError::InvalidArgument("project has no id".to_string()))?;

        let result = sqlx::query(
            r#"UPDATE user_projects SET name = ?, description = ?, user_id = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.user_id)
        .bind(project.updated_at.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::ProjectNotFound(id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        let result = sqlx::query("DELETE FROM user_projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::ProjectNotFound(id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    description: Option<String>,
    user_id: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ProjectRow> for UserProject {
    type Error = ServiceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let created_at = super::parse_datetime(&row.created_at)?;
        let updated_at = super::parse_datetime(&row.updated_at)?;

        Ok(UserProject {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            user_id: row.user_id,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_store() -> SqliteProjectStore {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteProjectStore::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = setup_test_store().await;

        let created = store
            .create(&UserProject::new("billing-api", 7).with_description("invoices"))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "billing-api");
        assert_eq!(fetched.description.as_deref(), Some("invoices"));
        assert_eq!(fetched.user_id, 7);
    }

    #[tokio::test]
    async fn test_list_by_user_filters() {
        let store = setup_test_store().await;

        store.create(&UserProject::new("a", 1)).await.unwrap();
        store.create(&UserProject::new("b", 1)).await.unwrap();
        store.create(&UserProject::new("c", 2)).await.unwrap();

        assert_eq!(store.list_by_user(1).await.unwrap().len(), 2);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive_substring() {
        let store = setup_test_store().await;

        store.create(&UserProject::new("Billing-API", 1)).await.unwrap();
        store.create(&UserProject::new("frontend", 1)).await.unwrap();

        let hits = store.find_by_name("billing").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Billing-API");
    }

    #[tokio::test]
    async fn test_update_missing_project_fails() {
        let store = setup_test_store().await;

        let mut phantom = UserProject::new("ghost", 1);
        phantom.id = Some(999);

        let err = store.update(&phantom).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProjectNotFound(999)));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let store = setup_test_store().await;

        let created = store.create(&UserProject::new("tmp", 1)).await.unwrap();
        let id = created.id.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.get(id).await.unwrap().is_none());

        let err = store.delete(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::ProjectNotFound(_)));
    }
}
