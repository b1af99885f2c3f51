//! SQLite implementation of the `RepoStore`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::ServiceResult;
use crate::domain::models::RepoRecord;
use crate::domain::ports::RepoStore;

#[derive(Clone)]
pub struct SqliteRepoStore {
    pool: SqlitePool,
}

impl SqliteRepoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepoStore for SqliteRepoStore {
    async fn find_by_username(&self, username: &str) -> ServiceResult<Vec<RepoRecord>> {
        let rows: Vec<RepoRow> = sqlx::query_as(
            "SELECT * FROM user_repos WHERE username = ? ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn find_by_username_and_name(
        &self,
        username: &str,
        repo_name: &str,
    ) -> ServiceResult<Option<RepoRecord>> {
        let row: Option<RepoRow> = sqlx::query_as(
            "SELECT * FROM user_repos WHERE username = ? AND repo_name = ?",
        )
        .bind(username)
        .bind(repo_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn save(&self, record: &RepoRecord) -> ServiceResult<RepoRecord> {
        // Upsert on the composite key so a concurrent double-fetch cannot
        // duplicate a row; the fresher fetch wins.
        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO user_repos (username, repo_name, url, fetched_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (username, repo_name)
               DO UPDATE SET url = excluded.url, fetched_at = excluded.fetched_at
               RETURNING id"#,
        )
        .bind(&record.username)
        .bind(&record.repo_name)
        .bind(&record.url)
        .bind(record.fetched_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(RepoRecord {
            id: Some(id),
            ..record.clone()
        })
    }

    async fn save_all(&self, records: &[RepoRecord]) -> ServiceResult<Vec<RepoRecord>> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(records.len());

        for record in records {
            let (id,): (i64,) = sqlx::query_as(
                r#"INSERT INTO user_repos (username, repo_name, url, fetched_at)
                   VALUES (?, ?, ?, ?)
                   ON CONFLICT (username, repo_name)
                   DO UPDATE SET url = excluded.url, fetched_at = excluded.fetched_at
                   RETURNING id"#,
            )
            .bind(&record.username)
            .bind(&record.repo_name)
            .bind(&record.url)
            .bind(record.fetched_at.to_rfc3339())
            .fetch_one(&mut *tx)
            .await?;

            saved.push(RepoRecord {
                id: Some(id),
                ..record.clone()
            });
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn find_all(&self) -> ServiceResult<Vec<RepoRecord>> {
        let rows: Vec<RepoRow> = sqlx::query_as("SELECT * FROM user_repos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }
}

#[derive(sqlx::FromRow)]
struct RepoRow {
    id: i64,
    username: String,
    repo_name: String,
    url: String,
    fetched_at: String,
}

impl TryFrom<RepoRow> for RepoRecord {
    type Error = crate::domain::errors::ServiceError;

    fn try_from(row: RepoRow) -> Result<Self, Self::Error> {
        let fetched_at = super::parse_datetime(&row.fetched_at)?;

        Ok(RepoRecord {
            id: Some(row.id),
            username: row.username,
            repo_name: row.repo_name,
            url: row.url,
            fetched_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_store() -> SqliteRepoStore {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteRepoStore::new(pool)
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let store = setup_test_store().await;

        let record = RepoRecord::new("octocat", "Hello-World", "https://github.com/octocat/Hello-World");
        let saved = store.save(&record).await.unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.username, "octocat");
    }

    #[tokio::test]
    async fn test_find_by_username_is_exact_match() {
        let store = setup_test_store().await;

        store
            .save(&RepoRecord::new("octocat", "Hello-World", "https://github.com/octocat/Hello-World"))
            .await
            .unwrap();

        let found = store.find_by_username("octocat").await.unwrap();
        assert_eq!(found.len(), 1);

        // No case-folding.
        let found = store.find_by_username("Octocat").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_never_duplicates_composite_key() {
        let store = setup_test_store().await;

        let first = RepoRecord::new("octocat", "Hello-World", "https://github.com/old");
        let second = RepoRecord::new("octocat", "Hello-World", "https://github.com/new");

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let found = store.find_by_username("octocat").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://github.com/new");
    }

    #[tokio::test]
    async fn test_save_all_is_batched() {
        let store = setup_test_store().await;

        let records = vec![
            RepoRecord::new("octocat", "Hello-World", "https://github.com/octocat/Hello-World"),
            RepoRecord::new("octocat", "Spoon-Knife", "https://github.com/octocat/Spoon-Knife"),
        ];
        let saved = store.save_all(&records).await.unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|r| r.id.is_some()));
        assert_eq!(store.find_by_username("octocat").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_username_and_name() {
        let store = setup_test_store().await;

        store
            .save(&RepoRecord::new("octocat", "Hello-World", "https://github.com/octocat/Hello-World"))
            .await
            .unwrap();

        let found = store
            .find_by_username_and_name("octocat", "Hello-World")
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = store
            .find_by_username_and_name("octocat", "No-Such-Repo")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_all_spans_usernames() {
        let store = setup_test_store().await;

        store
            .save(&RepoRecord::new("octocat", "Hello-World", "https://github.com/octocat/Hello-World"))
            .await
            .unwrap();
        store
            .save(&RepoRecord::new("torvalds", "linux", "https://github.com/torvalds/linux"))
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_empty_store() {
        let store = setup_test_store().await;
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
