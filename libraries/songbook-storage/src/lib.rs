//! Songbook Storage
//!
//! `SQLite` database layer for the Songbook music catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and row mapping
//! - **Injected Pool**: Every function takes the `SqlitePool` it runs on; the
//!   pool is created once by the application and shared
//! - **Single Statements**: Related writes are issued independently, there is
//!   no multi-statement transaction around a request
//!
//! # Example
//!
//! ```rust,no_run
//! use songbook_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://songbook.db").await?;
//! run_migrations(&pool).await?;
//!
//! let songs = songbook_storage::songs::get_all(&pool, &Default::default()).await?;
//! # Ok(())
//! # }
//! ```

// Vertical slices
pub mod activities;
pub mod album_likes;
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod playlists;
pub mod songs;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://songbook.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("Pool created");

    Ok(pool)
}

/// Current time as stored in timestamp columns
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
