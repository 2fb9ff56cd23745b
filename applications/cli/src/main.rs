/// Musa - playlist manager
use clap::Parser;
use musa_cli::{commands, config::MusaConfig, headless::LibraryPlayer};
use musa_playback::PlaybackManager;
use musa_storage::SqliteDocumentStore;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musa")]
#[command(about = "Musa playlist manager", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./musa.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = MusaConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Initialize database
    if let Some(parent) = config
        .storage
        .database_path()
        .as_deref()
        .and_then(std::path::Path::parent)
    {
        std::fs::create_dir_all(parent)?;
    }
    let pool = musa_storage::create_pool(&config.storage.database_url).await?;
    musa_storage::run_migrations(&pool).await?;
    tracing::debug!(
        url = %config.storage.database_url,
        document = %config.storage.document,
        "Database ready"
    );

    let store = Arc::new(SqliteDocumentStore::new(pool, config.storage.document.clone()));
    let manager = PlaybackManager::new(
        Arc::new(LibraryPlayer::new()),
        store,
        config.playback.clone(),
    );

    let mut stdout = std::io::stdout().lock();
    commands::run(&manager, cli.command, &mut stdout).await?;

    Ok(())
}
