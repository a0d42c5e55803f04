//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] error. At the [`StatsSource`](dexstats_core::StatsSource)
//! boundary they are converted into [`SourceError`].

use dexstats_core::SourceError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `MySQL` operation failed.
    #[error("MySQL error: {0}")]
    Mysql(#[from] sqlx::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Whether the database could not be reached at all, as opposed to a
    /// query that ran and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Mysql(
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
        )
    }
}

impl From<DbError> for SourceError {
    fn from(err: DbError) -> Self {
        if err.is_unavailable() {
            Self::Unavailable(err.to_string())
        } else {
            Self::Query(err.to_string())
        }
    }
}
