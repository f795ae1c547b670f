//! Startup configuration.
//!
//! Every setting comes from a command-line flag or its environment variable
//! and is resolved once into an immutable [`Config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::db::{Database, TableName};

pub const DEFAULT_TABLE: &str = "notes";
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 3000;

/// Where notes are stored.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// SQLite database file [default: platform data dir]
    #[arg(long = "db", env = "NOTES_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Table holding the notes
    #[arg(long, env = "NOTES_TABLE_NAME", default_value = DEFAULT_TABLE, global = true)]
    pub table: String,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "NOTES_HOST", default_value_t = DEFAULT_HOST, global = true)]
    pub host: IpAddr,

    /// Port for HTTP API
    #[arg(short, long, env = "NOTES_PORT", default_value_t = DEFAULT_PORT, global = true)]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub table: TableName,
    pub addr: SocketAddr,
}

impl Config {
    pub fn resolve(store: StoreArgs, server: ServerArgs) -> Result<Self> {
        let db_path = match store.db_path {
            Some(path) => path,
            None => Database::default_path()?,
        };

        Ok(Self {
            db_path,
            table: TableName::parse(&store.table)?,
            addr: SocketAddr::new(server.host, server.port),
        })
    }

    pub fn open_database(&self) -> Result<Database> {
        Database::open(&self.db_path, self.table.as_str())
    }
}
