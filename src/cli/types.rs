//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repocache")]
#[command(about = "Read-through caching proxy for GitHub public repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Path to a configuration file (defaults to .repocache/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve,

    /// Fetch a user's repositories, serving from cache when possible
    Fetch {
        /// GitHub username
        username: String,
    },

    /// Fetch a single repository, serving from cache when possible
    Get {
        /// GitHub username
        username: String,

        /// Repository name
        repo: String,
    },

    /// List every cached repository record
    Cached,

    /// User project management commands
    #[command(subcommand)]
    Project(ProjectCommands),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name
        name: String,

        /// Owning user id
        #[arg(short, long)]
        user_id: i64,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show a project by id
    Show {
        /// Project id
        id: i64,
    },

    /// List projects
    List {
        /// Filter by owning user id
        #[arg(short, long)]
        user_id: Option<i64>,

        /// Filter by name substring (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Update a project
    Update {
        /// Project id
        id: i64,

        /// New project name
        name: String,

        /// New owning user id
        #[arg(short, long)]
        user_id: Option<i64>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a project
    Delete {
        /// Project id
        id: i64,
    },
}
