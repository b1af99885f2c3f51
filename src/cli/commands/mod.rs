//! CLI command implementations.

pub mod project;
pub mod repos;
pub mod serve;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::github::GitHubClient;
use crate::adapters::sqlite::{self, SqliteProjectStore, SqliteRepoStore};
use crate::domain::models::Config;
use crate::services::{ProjectService, RepoCacheService};

/// Wired services for a one-shot command.
pub struct AppContext {
    pub repos: Arc<RepoCacheService<SqliteRepoStore, GitHubClient>>,
    pub projects: Arc<ProjectService<SqliteProjectStore>>,
}

/// Open the database and wire the core services.
///
/// One-shot commands always use the plain store; the moka read cache
/// only pays off in the long-running server.
pub async fn build_context(config: &Config) -> Result<AppContext> {
    let pool = sqlite::initialize_database(&config.database)
        .await
        .context("Failed to initialize database")?;
    let github = GitHubClient::new(&config.github).context("Failed to build GitHub client")?;

    let repo_store = Arc::new(SqliteRepoStore::new(pool.clone()));
    let project_store = Arc::new(SqliteProjectStore::new(pool));

    Ok(AppContext {
        repos: Arc::new(RepoCacheService::new(repo_store, Arc::new(github))),
        projects: Arc::new(ProjectService::new(project_store)),
    })
}
