//! Persisted editor prompts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{template::Template, variables::VariableItem};

/// A prompt saved from the editor: template text plus the values typed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPrompt {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: Template,
    pub variables: Vec<VariableItem>,
    /// Compiled text at save time, for listing without recompiling.
    pub compiled_content: String,
    pub run_count: u32,
    pub last_run_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedPrompt {
    /// Apply a newer snapshot of the same prompt, keeping its creation time.
    pub fn updated_from(mut self, newer: SavedPrompt) -> Self {
        let created_at = self.created_at;
        self = newer;
        self.created_at = created_at;
        self
    }

    /// Case-insensitive substring match on title or description.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}
