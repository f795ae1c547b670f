//! SQLite-backed note storage.

mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use directories::ProjectDirs;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::Note;
use crate::store::NoteStore;

pub use schema::{create_table_sql, TableName};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("invalid table name {0:?}: expected letters, digits and underscores")]
    InvalidTableName(String),
    #[error("could not determine a data directory for the default database")]
    NoDataDir,
}

const COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Shared handle to the notes database.
///
/// Holds one long-lived connection; clones share it.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    table: TableName,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, table: &str) -> Result<Self> {
        let path = path.as_ref();
        let table = TableName::parse(table)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening database at {}", path.display()))?;
        tracing::debug!("Opened database at {}", path.display());

        Ok(Self::from_connection(conn, table))
    }

    /// Open the database at [`Database::default_path`].
    pub fn open_default(table: &str) -> Result<Self> {
        Self::open(Self::default_path()?, table)
    }

    pub fn open_in_memory(table: &str) -> Result<Self> {
        let table = TableName::parse(table)?;
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn, table))
    }

    /// `<platform data dir>/notes.db`, e.g. `~/.local/share/notes/notes.db`.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "notes").ok_or(DbError::NoDataDir)?;
        Ok(dirs.data_dir().join("notes.db"))
    }

    fn from_connection(conn: Connection, table: TableName) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            table,
        }
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    pub fn table_exists(&self) -> Result<bool> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![self.table.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Create the notes table if it is absent.
    ///
    /// Returns `true` if the table was created, `false` if it already existed.
    pub fn create_table(&self) -> Result<bool> {
        if self.table_exists()? {
            return Ok(false);
        }

        let conn = self.conn()?;
        conn.execute_batch(&create_table_sql(&self.table))
            .with_context(|| format!("creating table {}", self.table))?;
        tracing::info!("Created table {}", self.table);

        Ok(true)
    }
}

impl NoteStore for Database {
    fn create_note(&self, title: &str, content: &str) -> Result<Note> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn()?;
        // Plain INSERT: an id collision fails on the primary key instead of
        // replacing the existing row.
        conn.execute(
            &format!("INSERT INTO {} ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)", self.table),
            params![
                note.id.to_string(),
                note.title,
                note.content,
                format_timestamp(&note.created_at),
                format_timestamp(&note.updated_at),
            ],
        )?;
        tracing::debug!(id = %note.id, "Created note");

        Ok(note)
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM {}", self.table))?;
        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    fn update_note(&self, id: Uuid, title: &str, content: &str) -> Result<Option<Note>> {
        let now = format_timestamp(&Utc::now());

        let conn = self.conn()?;
        // MAX keeps updated_at monotonic even if the wall clock steps back.
        let note = conn
            .query_row(
                &format!(
                    "UPDATE {} SET title = ?2, content = ?3, updated_at = MAX(updated_at, ?4) \
                     WHERE id = ?1 RETURNING {COLUMNS}",
                    self.table
                ),
                params![id.to_string(), title, content, now],
                row_to_note,
            )
            .optional()?;

        match &note {
            Some(_) => tracing::debug!(%id, "Updated note"),
            None => tracing::debug!(%id, "Update skipped, note not found"),
        }

        Ok(note)
    }

    fn delete_note(&self, id: Uuid) -> Result<()> {
        let conn = self.conn()?;
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.table),
            params![id.to_string()],
        )?;
        tracing::debug!(%id, removed, "Deleted note");

        Ok(())
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Note {
        id: Uuid::parse_str(&id).map_err(|e| conversion_error(0, e))?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_timestamp(3, &created_at)?,
        updated_at: parse_timestamp(4, &updated_at)?,
    })
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
