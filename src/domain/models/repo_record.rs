//! Repository records as known to the persistent store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository owned by a user.
///
/// `(username, repo_name)` is unique in the persistent store; repeated
/// fetches never duplicate a record for the same owner/repo pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Persistence-assigned identifier; `None` until the record is saved.
    pub id: Option<i64>,
    /// Owner login the record was fetched for.
    pub username: String,
    /// Repository name.
    pub repo_name: String,
    /// Canonical web URL of the repository.
    pub url: String,
    /// When the record was fetched from the remote source.
    pub fetched_at: DateTime<Utc>,
}

impl RepoRecord {
    /// Create an unsaved record.
    pub fn new(
        username: impl Into<String>,
        repo_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            repo_name: repo_name.into(),
            url: url.into(),
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_id() {
        let record = RepoRecord::new("octocat", "Hello-World", "https://github.com/octocat/Hello-World");
        assert!(record.id.is_none());
        assert_eq!(record.username, "octocat");
        assert_eq!(record.repo_name, "Hello-World");
    }
}
