//! Storage abstraction for notes.
//!
//! [`NoteStore`] is the seam between the request handlers and the backing
//! store. [`Database`](crate::db::Database) is the SQLite implementation.

use uuid::Uuid;

use crate::models::Note;

/// The four storage operations behind the notes API.
///
/// Implementations issue one round trip per call and never retry or cache.
/// Errors are returned to the caller untouched.
pub trait NoteStore: Send + Sync {
    /// Persist a new note with a fresh id and `created_at == updated_at == now`.
    fn create_note(&self, title: &str, content: &str) -> anyhow::Result<Note>;

    /// Every persisted note, in no particular order.
    fn list_notes(&self) -> anyhow::Result<Vec<Note>>;

    /// Replace title and content and refresh `updated_at`.
    ///
    /// Returns the stored row after the update, or `None` if `id` is unknown.
    fn update_note(&self, id: Uuid, title: &str, content: &str) -> anyhow::Result<Option<Note>>;

    /// Remove the note if present. Deleting an unknown id is not an error.
    fn delete_note(&self, id: Uuid) -> anyhow::Result<()>;
}
