//! One-time creation of the notes table.
//!
//! The server never creates schema itself; run `notes provision` once
//! against a fresh database before `notes serve`.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::db::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

pub fn provision(config: &Config) -> Result<Provisioned> {
    let db = config.open_database()?;
    provision_database(&db)
}

/// Open the configured database for serving.
///
/// Fails if the table has not been provisioned.
pub fn open_provisioned(config: &Config) -> Result<Database> {
    let db = config.open_database()?;
    if !db.table_exists()? {
        bail!(
            "table {} does not exist in {}; run `notes provision` first",
            config.table,
            config.db_path.display()
        );
    }
    Ok(db)
}

pub fn provision_database(db: &Database) -> Result<Provisioned> {
    if db.create_table()? {
        tracing::info!("Table {} created", db.table());
        Ok(Provisioned::Created)
    } else {
        tracing::info!("Table {} already exists", db.table());
        Ok(Provisioned::AlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TableName;
    use crate::store::NoteStore;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            db_path: dir.path().join("notes.db"),
            table: TableName::parse("notes").unwrap(),
            addr: "127.0.0.1:0".parse().unwrap(),
        }
    }

    #[test]
    fn provision_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        assert_eq!(provision(&config).unwrap(), Provisioned::Created);
        assert_eq!(provision(&config).unwrap(), Provisioned::AlreadyExists);
    }

    #[test]
    fn serving_requires_a_provisioned_table() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let err = open_provisioned(&config).unwrap_err();
        assert!(err.to_string().contains("notes provision"));

        provision(&config).unwrap();
        let db = open_provisioned(&config).unwrap();
        assert!(db.list_notes().unwrap().is_empty());
    }

    #[test]
    fn provisioning_keeps_existing_notes() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        provision(&config).unwrap();

        let db = config.open_database().unwrap();
        let note = db.create_note("A", "x").unwrap();

        assert_eq!(provision_database(&db).unwrap(), Provisioned::AlreadyExists);
        assert_eq!(db.list_notes().unwrap(), vec![note]);
    }
}
