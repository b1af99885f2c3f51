//! Remote repository source port.

use async_trait::async_trait;

use crate::domain::errors::RemoteError;

/// Raw repository descriptor as returned by the remote source.
///
/// Only the fields the cache persists; everything else in the upstream
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    /// Display name of the repository.
    pub name: String,
    /// Canonical web URL.
    pub url: String,
}

/// The upstream API owning ground truth for a user's current repositories.
#[async_trait]
pub trait RemoteRepoSource: Send + Sync {
    /// List the public repositories owned by `username`.
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoDescriptor>, RemoteError>;

    /// Fetch a single repository by owner and name.
    ///
    /// Returns `Ok(None)` when the remote reports no such repository.
    async fn get_repo(
        &self,
        username: &str,
        repo_name: &str,
    ) -> Result<Option<RepoDescriptor>, RemoteError>;
}
