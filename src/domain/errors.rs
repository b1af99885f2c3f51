//! Domain errors for the repocache service.

use thiserror::Error;

/// Render an optional retry-after hint for rate-limit messages.
fn retry_hint(secs: &Option<u64>) -> String {
    secs.map(|s| format!(" (retry after {s}s)")).unwrap_or_default()
}

/// Failure modes of the remote repository source.
///
/// The service contract requires quota exhaustion to stay distinguishable
/// from other transport failures, so the HTTP surface can answer 429
/// instead of a generic 5xx.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote API reported quota exhaustion.
    #[error("remote API rate limit exceeded{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    /// The remote API answered with a non-success status.
    #[error("remote API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote API could not be reached at all.
    #[error("remote API unreachable: {0}")]
    Unreachable(String),

    /// The remote API answered 2xx but the payload did not parse.
    #[error("remote API response malformed: {0}")]
    Malformed(String),
}

/// Domain-level errors surfaced by the cache and project services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("repository not found: {username}/{repo_name}")]
    RepoNotFound { username: String, repo_name: String },

    #[error("project not found: {0}")]
    ProjectNotFound(i64),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Serialization(err.to_string())
    }
}
