use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes::api;
use notes::config::{Config, ServerArgs, StoreArgs};
use notes::provision::{self, Provisioned};

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Minimal note-taking server")]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    server: ServerArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create the notes table if it does not exist yet
    Provision,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "notes=debug,notes_core=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.store, cli.server)?;

    match cli.command {
        Some(Commands::Provision) => match provision::provision(&config)? {
            Provisioned::Created => println!("Table {} created.", config.table),
            Provisioned::AlreadyExists => println!("Table {} already exists.", config.table),
        },
        Some(Commands::Serve) | None => serve(&config).await?,
    }

    Ok(())
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let db = provision::open_provisioned(config)?;

    tracing::info!("Serving table {} from {}", config.table, config.db_path.display());

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Notes server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
