use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

pub type DatabasePool = sqlx::SqlitePool;

/// Connection pool with the embedded migrations applied.
#[derive(Clone)]
pub struct Database {
    pool: DatabasePool,
}

impl Database {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let in_memory = url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Every in-memory connection is its own database, so pin the pool
        // to one connection that never expires.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(in_memory, "database ready");

        Ok(Self { pool })
    }

    pub fn clone_pool(&self) -> DatabasePool {
        self.pool.clone()
    }
}
