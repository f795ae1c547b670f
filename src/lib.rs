//! Notes server: HTTP API, configuration and provisioning.
//!
//! Models and storage live in `notes-core` and are re-exported here.

pub mod api;
pub mod config;
pub mod provision;

pub use notes_core::{db, models, store};
