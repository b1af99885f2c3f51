//! Read-through repository cache service.
//!
//! Single entry point for the cache-or-fetch-then-persist flow: cached
//! records are served from the persistent store; a miss fetches from the
//! remote source, persists the mapped records, and returns them. A hit
//! never triggers a background refresh, and nothing here retries.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::RepoRecord;
use crate::domain::ports::{RemoteRepoSource, RepoDescriptor, RepoStore};

pub struct RepoCacheService<S: RepoStore, R: RemoteRepoSource> {
    store: Arc<S>,
    remote: Arc<R>,
    /// Per-username fetch locks; concurrent first-time requests for one
    /// username produce a single remote fetch.
    fetch_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: RepoStore, R: RemoteRepoSource> RepoCacheService<S, R> {
    pub fn new(store: Arc<S>, remote: Arc<R>) -> Self {
        Self {
            store,
            remote,
            fetch_locks: Mutex::new(HashMap::new()),
        }
    }

    /// All repositories for a username, served from the store when
    /// present, otherwise fetched, persisted, and returned.
    ///
    /// A failed save fails the whole operation; the fetched set is never
    /// returned past a write error.
    pub async fn repos_for_user(&self, username: &str) -> ServiceResult<Vec<RepoRecord>> {
        require_non_blank(username, "username")?;

        let cached = self.store.find_by_username(username).await?;
        if !cached.is_empty() {
            tracing::debug!(username, count = cached.len(), "serving cached repositories");
            return Ok(cached);
        }

        let lock = self.fetch_lock(username).await;
        let _guard = lock.lock().await;

        // Re-check under the lock: a concurrent caller may have finished
        // the fetch while we waited.
        let cached = self.store.find_by_username(username).await?;
        if !cached.is_empty() {
            return Ok(cached);
        }

        tracing::info!(username, "cache miss, fetching from remote source");
        let descriptors = self.remote.list_repos(username).await?;
        let records: Vec<RepoRecord> = descriptors
            .into_iter()
            .map(|d| map_descriptor(username, d))
            .collect();

        let saved = self.store.save_all(&records).await?;
        tracing::info!(username, count = saved.len(), "persisted fetched repositories");
        Ok(saved)
    }

    /// A single repository by `(username, repo_name)`, read-through at
    /// record granularity. A remote miss is `RepoNotFound`.
    pub async fn repo_for_user(
        &self,
        username: &str,
        repo_name: &str,
    ) -> ServiceResult<RepoRecord> {
        require_non_blank(username, "username")?;
        require_non_blank(repo_name, "repo name")?;

        if let Some(record) = self
            .store
            .find_by_username_and_name(username, repo_name)
            .await?
        {
            return Ok(record);
        }

        let descriptor = self
            .remote
            .get_repo(username, repo_name)
            .await?
            .ok_or_else(|| ServiceError::RepoNotFound {
                username: username.to_string(),
                repo_name: repo_name.to_string(),
            })?;

        let record = map_descriptor(username, descriptor);
        self.store.save(&record).await
    }

    /// The entire persisted set, unfiltered. No side effects.
    pub async fn cached_repos(&self) -> ServiceResult<Vec<RepoRecord>> {
        self.store.find_all().await
    }

    async fn fetch_lock(&self, username: &str) -> Arc<Mutex<()>> {
        let mut locks = self.fetch_locks.lock().await;
        locks
            .entry(username.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Map a remote descriptor to an unsaved record.
///
/// The owner login always comes from the query, never from the
/// descriptor, and the id is left unassigned to force insertion.
fn map_descriptor(username: &str, descriptor: RepoDescriptor) -> RepoRecord {
    RepoRecord::new(username, descriptor.name, descriptor.url)
}

/// Reject empty or whitespace-only arguments before any I/O.
fn require_non_blank(value: &str, what: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidArgument(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}
