//! User project management commands.

use anyhow::{Context, Result};

use crate::cli::commands::AppContext;
use crate::cli::output::format_project_table;
use crate::cli::types::ProjectCommands;
use crate::domain::models::UserProject;

/// Dispatch a project subcommand.
pub async fn execute(ctx: &AppContext, command: ProjectCommands, json: bool) -> Result<()> {
    match command {
        ProjectCommands::Create {
            name,
            user_id,
            description,
        } => handle_create(ctx, name, user_id, description, json).await,
        ProjectCommands::Show { id } => handle_show(ctx, id, json).await,
        ProjectCommands::List { user_id, name } => handle_list(ctx, user_id, name, json).await,
        ProjectCommands::Update {
            id,
            name,
            user_id,
            description,
        } => handle_update(ctx, id, name, user_id, description, json).await,
        ProjectCommands::Delete { id } => handle_delete(ctx, id, json).await,
    }
}

async fn handle_create(
    ctx: &AppContext,
    name: String,
    user_id: i64,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let mut project = UserProject::new(name, user_id);
    project.description = description;

    let created = ctx
        .projects
        .create_project(project)
        .await
        .context("Failed to create project")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!("Project created with id {}", created.id.unwrap_or_default());
    }

    Ok(())
}

async fn handle_show(ctx: &AppContext, id: i64, json: bool) -> Result<()> {
    let project = ctx
        .projects
        .get_project(id)
        .await
        .context("Failed to load project")?
        .ok_or_else(|| anyhow::anyhow!("Project not found: {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        println!("{}", format_project_table(std::slice::from_ref(&project)));
    }

    Ok(())
}

async fn handle_list(
    ctx: &AppContext,
    user_id: Option<i64>,
    name: Option<String>,
    json: bool,
) -> Result<()> {
    let projects = match (user_id, name) {
        (Some(user_id), _) => ctx.projects.projects_for_user(user_id).await,
        (None, Some(name)) => ctx.projects.search_projects(&name).await,
        (None, None) => ctx.projects.list_projects().await,
    }
    .context("Failed to list projects")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if projects.is_empty() {
        println!("No projects found.");
    } else {
        println!("{}", format_project_table(&projects));
    }

    Ok(())
}

async fn handle_update(
    ctx: &AppContext,
    id: i64,
    name: String,
    user_id: Option<i64>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let existing = ctx
        .projects
        .get_project(id)
        .await
        .context("Failed to load project")?
        .ok_or_else(|| anyhow::anyhow!("Project not found: {id}"))?;

    let updated = UserProject {
        name,
        user_id: user_id.unwrap_or(existing.user_id),
        description: description.or_else(|| existing.description.clone()),
        ..existing
    };

    let saved = ctx
        .projects
        .update_project(updated)
        .await
        .context("Failed to update project")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        println!("Project {id} updated.");
    }

    Ok(())
}

async fn handle_delete(ctx: &AppContext, id: i64, json: bool) -> Result<()> {
    ctx.projects
        .delete_project(id)
        .await
        .context("Failed to delete project")?;

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Project {id} deleted.");
    }

    Ok(())
}
