//! Repository fetch and listing commands.

use anyhow::{Context, Result};

use crate::cli::commands::AppContext;
use crate::cli::output::format_repo_table;

/// Handle the fetch command.
pub async fn handle_fetch(ctx: &AppContext, username: &str, json: bool) -> Result<()> {
    let repos = ctx
        .repos
        .repos_for_user(username)
        .await
        .context("Failed to fetch repositories")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else if repos.is_empty() {
        println!("No repositories found for {username}.");
    } else {
        println!("{}", format_repo_table(&repos));
        println!("\n{} repositor{}", repos.len(), if repos.len() == 1 { "y" } else { "ies" });
    }

    Ok(())
}

/// Handle the get command.
pub async fn handle_get(ctx: &AppContext, username: &str, repo: &str, json: bool) -> Result<()> {
    let record = ctx
        .repos
        .repo_for_user(username, repo)
        .await
        .context("Failed to fetch repository")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", format_repo_table(std::slice::from_ref(&record)));
    }

    Ok(())
}

/// Handle the cached command.
pub async fn handle_cached(ctx: &AppContext, json: bool) -> Result<()> {
    let repos = ctx
        .repos
        .cached_repos()
        .await
        .context("Failed to list cached repositories")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else if repos.is_empty() {
        println!("The cache is empty.");
    } else {
        println!("{}", format_repo_table(&repos));
        println!("\n{} cached record(s)", repos.len());
    }

    Ok(())
}
