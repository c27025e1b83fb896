use std::path::Path;
use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection};

use crate::error::Result;

/// Persistence context passed into every service. There is no process-wide
/// connection; tests and embedding applications construct their own.
pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Open or create a SQLite database at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let db = Self::connect(&url).await?;

        tracing::info!("Database ready at: {}", path.display());
        Ok(db)
    }

    /// Connect to an arbitrary database URL and run pending migrations
    pub async fn connect(url: &str) -> Result<Self> {
        let mut opt = ConnectOptions::new(url.to_owned());
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(8))
            .max_lifetime(Duration::from_secs(8))
            .sqlx_logging(false);

        let conn = SeaDatabase::connect(opt).await?;

        conn.execute_unprepared("PRAGMA foreign_keys = ON").await?;

        tracing::debug!("Running database migrations");
        migration::Migrator::up(&conn, None).await?;

        Ok(Database { conn })
    }
}
