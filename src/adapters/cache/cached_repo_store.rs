//! Cached wrapper for `RepoStore` using a moka TTL cache.
//!
//! Caches `find_by_username` listings, the hot path of the read-through
//! flow, in front of the persistent store. All write operations
//! invalidate the affected username. Single-record and full listings go
//! straight to the inner store.

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::ServiceResult;
use crate::domain::models::{CacheConfig, RepoRecord};
use crate::domain::ports::RepoStore;

/// Cached repo store decorator.
pub struct CachedRepoStore<S: RepoStore> {
    inner: Arc<S>,
    /// Cache keyed by username -> fetched listing.
    by_username: Cache<String, Arc<Vec<RepoRecord>>>,
}

impl<S: RepoStore> CachedRepoStore<S> {
    /// Create a cached store from configuration.
    pub fn new(inner: Arc<S>, config: &CacheConfig) -> Self {
        let by_username = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();

        Self { inner, by_username }
    }

    async fn invalidate_username(&self, username: &str) {
        self.by_username.invalidate(username).await;
    }
}

#[async_trait]
impl<S: RepoStore + 'static> RepoStore for CachedRepoStore<S> {
    async fn find_by_username(&self, username: &str) -> ServiceResult<Vec<RepoRecord>> {
        if let Some(cached) = self.by_username.get(username).await {
            return Ok((*cached).clone());
        }

        let records = self.inner.find_by_username(username).await?;
        // Empty listings are not cached: a miss must keep hitting the
        // store so a concurrent writer's rows become visible.
        if !records.is_empty() {
            self.by_username
                .insert(username.to_string(), Arc::new(records.clone()))
                .await;
        }
        Ok(records)
    }

    async fn find_by_username_and_name(
        &self,
        username: &str,
        repo_name: &str,
    ) -> ServiceResult<Option<RepoRecord>> {
        self.inner.find_by_username_and_name(username, repo_name).await
    }

    async fn save(&self, record: &RepoRecord) -> ServiceResult<RepoRecord> {
        let result = self.inner.save(record).await;
        if result.is_ok() {
            self.invalidate_username(&record.username).await;
        }
        result
    }

    async fn save_all(&self, records: &[RepoRecord]) -> ServiceResult<Vec<RepoRecord>> {
        let result = self.inner.save_all(records).await;
        if result.is_ok() {
            for record in records {
                self.invalidate_username(&record.username).await;
            }
        }
        result
    }

    async fn find_all(&self) -> ServiceResult<Vec<RepoRecord>> {
        self.inner.find_all().await
    }
}
