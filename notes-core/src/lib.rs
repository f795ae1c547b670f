//! Core library for Notes.
//!
//! This crate provides the note model and the storage accessor for Notes,
//! independent of any transport layer (HTTP, terminal client, etc.).
//!
//! # Usage
//!
//! ```no_run
//! use notes_core::db::Database;
//! use notes_core::store::NoteStore;
//!
//! let db = Database::open_default("notes")?;
//! db.create_table()?;
//!
//! let note = db.create_note("Groceries", "milk, eggs")?;
//! let notes = db.list_notes()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod models;
pub mod store;

// Re-export commonly used types at crate root
pub use db::Database;
pub use models::Note;
pub use store::NoteStore;
