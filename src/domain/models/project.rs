//! User project entity and its lifecycle helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project owned by a user, managed through plain CRUD operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProject {
    /// Persistence-assigned identifier; `None` until the project is saved.
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Owning user.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProject {
    /// Create an unsaved project.
    pub fn new(name: impl Into<String>, user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            description: None,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the project before persisting.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("project name must not be empty".to_string());
        }
        Ok(())
    }
}
