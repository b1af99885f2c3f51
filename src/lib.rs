//! Repocache - read-through caching proxy for GitHub public repositories.
//!
//! Given a username, repocache serves that user's repositories from a
//! local SQLite store when present, and otherwise fetches them from the
//! GitHub API, persists them, and returns them. A thin HTTP surface and
//! a CLI expose the same three operations: fetch-or-cache by username,
//! fetch-or-cache a single repository, and list everything cached.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, ports, and the error taxonomy
//! - **Service Layer** (`services`): the read-through cache flow and
//!   project CRUD
//! - **Adapters** (`adapters`): SQLite store, GitHub client, moka read
//!   cache, axum HTTP surface
//! - **Infrastructure** (`infrastructure`): configuration loading
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{RemoteError, ServiceError, ServiceResult};
pub use domain::models::{Config, RepoRecord, UserProject};
pub use domain::ports::{ProjectStore, RemoteRepoSource, RepoDescriptor, RepoStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ProjectService, RepoCacheService};
