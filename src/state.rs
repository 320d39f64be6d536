use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sqlx::postgres::PgPool;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM database connection (all queries go through this)
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState: run migrations, then connect SeaORM.
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        // Connect with SQLx only to run migrations, then drop the pool;
        // every query afterwards goes through SeaORM.
        let pg_pool = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        pg_pool.close().await;

        // Connect to PostgreSQL with SeaORM
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(100)
            .min_connections(5)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        Ok(Self { db, config })
    }

    /// Create AppState around an already-connected database (for testing)
    #[allow(dead_code)]
    pub fn with_database(config: Config, db: DatabaseConnection) -> Self {
        Self { db, config }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
