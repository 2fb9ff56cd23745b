//! Musa Storage
//!
//! Persisted key-value documents for Musa.
//!
//! A document is a named set of keys whose values are JSON. The playback
//! crate keeps its playlist mapping and the last active playlist name in a
//! single document, so this crate only needs whole-value `get`/`set`.
//!
//! # Example
//!
//! ```rust,no_run
//! use musa_core::DocumentStore;
//! use musa_storage::{create_pool, run_migrations, SqliteDocumentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://musa.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteDocumentStore::new(pool, "music.json");
//! store.set("playlist", serde_json::json!("all")).await?;
//! # Ok(())
//! # }
//! ```

mod documents;
mod error;
mod memory;

pub use documents::SqliteDocumentStore;
pub use error::{Result, StorageError};
pub use memory::MemoryDocumentStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://musa.db>`)
pub async fn create_pool(database_url: &str) -> std::result::Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
