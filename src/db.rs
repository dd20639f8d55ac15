//! Connection provider: one PostgreSQL connection plus the configured table prefix.

use crate::config::AppConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared handle to the database. Cheap to clone; all clones use the same connection.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    prefix: Arc<str>,
}

impl Database {
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let options = match &config.database_url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.dbname),
        };
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        tracing::info!(prefix = %config.table_prefix(), "connected to database");
        Ok(Self::from_pool(pool, config.table_prefix()))
    }

    pub fn from_pool(pool: PgPool, prefix: &str) -> Self {
        Database {
            pool,
            prefix: Arc::from(prefix),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Release the connection. Pending statements finish first.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database connection closed");
    }
}
