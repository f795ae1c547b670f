use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::models::{Note, NoteInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let mut notes = state
        .store
        .list_notes()
        .map_err(|e| ApiError::store("Failed to fetch notes", e))?;

    sort_newest_first(&mut notes);
    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(input) = body?;
    let input = input.validate()?;

    let note = state
        .store
        .create_note(&input.title, &input.content)
        .map_err(|e| ApiError::store("Failed to create note", e))?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(input) = body?;
    let input = input.validate()?;
    // Ids are always UUIDs, so anything else cannot name a stored note.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound)?;

    let note = state
        .store
        .update_note(id, &input.title, &input.content)
        .map_err(|e| ApiError::store("Failed to update note", e))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    match Uuid::parse_str(&id) {
        Ok(id) => state
            .store
            .delete_note(id)
            .map_err(|e| ApiError::store("Failed to delete note", e))?,
        Err(_) => tracing::debug!(%id, "Delete of non-UUID id, nothing to remove"),
    }

    Ok(Json(MessageBody {
        message: "Note deleted successfully".into(),
    }))
}

/// Newest first by `created_at`; ties fall back to id for a stable order.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
