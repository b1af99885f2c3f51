//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the adapters implement:
//! - `RepoStore`: persistence for fetched repository records
//! - `RemoteRepoSource`: the upstream repository API
//! - `ProjectStore`: persistence for user projects
//!
//! These contracts keep the services independent of any specific
//! storage engine or HTTP stack.

pub mod project_store;
pub mod remote_source;
pub mod repo_store;

pub use project_store::ProjectStore;
pub use remote_source::{RemoteRepoSource, RepoDescriptor};
pub use repo_store::RepoStore;
