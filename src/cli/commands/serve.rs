//! HTTP server command.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::cache::CachedRepoStore;
use crate::adapters::github::GitHubClient;
use crate::adapters::http::ApiServer;
use crate::adapters::sqlite::{self, SqliteProjectStore, SqliteRepoStore};
use crate::domain::models::{Config, ServerConfig};
use crate::domain::ports::RepoStore;
use crate::services::{ProjectService, RepoCacheService};

/// Run the API server until interrupted.
pub async fn execute(config: Config) -> Result<()> {
    let pool = sqlite::initialize_database(&config.database)
        .await
        .context("Failed to initialize database")?;
    let github = Arc::new(GitHubClient::new(&config.github).context("Failed to build GitHub client")?);

    let projects = Arc::new(ProjectService::new(Arc::new(SqliteProjectStore::new(
        pool.clone(),
    ))));
    let repo_store = Arc::new(SqliteRepoStore::new(pool));

    if config.cache.enabled {
        tracing::info!(
            ttl_secs = config.cache.ttl_secs,
            "read cache enabled in front of the store"
        );
        let cached = Arc::new(CachedRepoStore::new(repo_store, &config.cache));
        let repos = Arc::new(RepoCacheService::new(cached, github));
        run_server(repos, projects, config.server).await
    } else {
        let repos = Arc::new(RepoCacheService::new(repo_store, github));
        run_server(repos, projects, config.server).await
    }
}

async fn run_server<S: RepoStore + 'static>(
    repos: Arc<RepoCacheService<S, GitHubClient>>,
    projects: Arc<ProjectService<SqliteProjectStore>>,
    server_config: ServerConfig,
) -> Result<()> {
    let server = ApiServer::new(repos, projects, server_config);
    server
        .serve_with_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
        })
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))
}
