//! `MySQL` pool over the scanner database.
//!
//! The scanner owns the schema and this crate only reads it, so nothing
//! here migrates. Queries are built at runtime and always bind their
//! parameters.

use std::time::Duration;

use dexstats_core::config::DatabaseConfig;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

use crate::error::DbError;

/// How long a page query waits for a free connection.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool handle to the scanner database.
#[derive(Debug, Clone)]
pub struct MysqlPool {
    pool: MySqlPool,
}

impl MysqlPool {
    /// Open a pool sized by the `database` config section.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if `database.url` is not a `MySQL` URL,
    /// or [`DbError::Mysql`] if the first connection fails.
    pub async fn connect(database: &DatabaseConfig) -> Result<Self, DbError> {
        let options: MySqlConnectOptions = database
            .url
            .parse()
            .map_err(|e: sqlx::Error| DbError::Config(format!("invalid database.url: {e}")))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(database.max_connections.max(1))
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        tracing::info!(
            max_connections = database.max_connections,
            "Scanner database connected"
        );
        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Close all connections, waiting for checked-out ones to return.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Scanner database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_is_config_error() {
        let database = DatabaseConfig {
            url: String::from("not a url"),
            max_connections: 2,
        };
        let result = MysqlPool::connect(&database).await;
        assert!(matches!(result, Err(DbError::Config(_))));
    }
}
