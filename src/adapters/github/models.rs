//! GitHub API response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are
//! used internally by the GitHub adapter and are not part of the public
//! domain model; unknown payload fields are ignored.

use serde::{Deserialize, Serialize};

/// A repository summary returned by the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    /// Repository name (e.g., "Hello-World").
    pub name: String,
    /// URL to view the repository in the GitHub UI.
    pub html_url: String,
}
