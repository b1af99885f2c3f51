//! Output formatting utilities for the CLI.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::domain::models::{RepoRecord, UserProject};

/// Render repository records as a table.
pub fn format_repo_table(repos: &[RepoRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Username", "Repository", "URL", "Fetched at"]);

    for repo in repos {
        table.add_row(vec![
            repo.id.map(|id| id.to_string()).unwrap_or_default(),
            repo.username.clone(),
            repo.repo_name.clone(),
            repo.url.clone(),
            repo.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }

    table.to_string()
}

/// Render projects as a table.
pub fn format_project_table(projects: &[UserProject]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Description", "User"]);

    for project in projects {
        table.add_row(vec![
            project.id.map(|id| id.to_string()).unwrap_or_default(),
            project.name.clone(),
            project.description.clone().unwrap_or_default(),
            project.user_id.to_string(),
        ]);
    }

    table.to_string()
}
