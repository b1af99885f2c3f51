//! Repository-record store port.

use async_trait::async_trait;

use crate::domain::errors::ServiceResult;
use crate::domain::models::RepoRecord;

/// Persistence interface for fetched repository records.
///
/// Lookups are by exact username match; no case-folding or normalization
/// happens at this layer or above it.
#[async_trait]
pub trait RepoStore: Send + Sync {
    /// All records fetched for a username, in insertion order.
    async fn find_by_username(&self, username: &str) -> ServiceResult<Vec<RepoRecord>>;

    /// Look up a single record by its `(username, repo_name)` composite key.
    async fn find_by_username_and_name(
        &self,
        username: &str,
        repo_name: &str,
    ) -> ServiceResult<Option<RepoRecord>>;

    /// Persist one record, returning it with its assigned id.
    async fn save(&self, record: &RepoRecord) -> ServiceResult<RepoRecord>;

    /// Persist a batch of records, returning them with assigned ids.
    async fn save_all(&self, records: &[RepoRecord]) -> ServiceResult<Vec<RepoRecord>>;

    /// The entire persisted set, unfiltered.
    async fn find_all(&self) -> ServiceResult<Vec<RepoRecord>>;
}
