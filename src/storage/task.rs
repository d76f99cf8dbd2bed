//! Task record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored task record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Server-generated, immutable, unique within its table.
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
    /// Set when completion is signalled, cleared when it is revoked.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validated creation input, produced by handler validation.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

/// A partial update.
///
/// Completion is an explicit signal rather than a caller-supplied
/// timestamp: `Some(true)` stamps `completed_at` with the current time,
/// `Some(false)` clears it, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl Task {
    pub fn new(draft: TaskDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Overwrite present patch fields and refresh `updated_at`.
    pub(crate) fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        match patch.completed {
            Some(true) => self.completed_at = Some(Utc::now()),
            Some(false) => self.completed_at = None,
            None => {}
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match against the string form of every
    /// field of the record (logical OR across fields).
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(self) else {
            return false;
        };
        fields.values().any(|value| {
            let text = match value {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            text.to_lowercase().contains(&needle)
        })
    }
}
