use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a note.
///
/// Both fields are optional here so that a missing field is reported as a
/// validation failure instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A note body that passed validation: both fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNote {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Title and content are required")]
pub struct MissingFields;

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    pub fn validate(self) -> Result<ValidNote, MissingFields> {
        match (non_empty(self.title), non_empty(self.content)) {
            (Some(title), Some(content)) => Ok(ValidNote { title, content }),
            _ => Err(MissingFields),
        }
    }
}

/// Whitespace counts as content; stored values are never trimmed.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
