//! Data layer for the Dexstats dashboard (scanner `MySQL` database).
//!
//! The scanner writes; the dashboard only reads. This crate owns the
//! connection pool and the [`StatsSource`](dexstats_core::StatsSource)
//! implementation that turns scanner tables into leaderboard records.
//!
//! ```text
//! PageComposer
//!     |
//!     +-- StatsSource --> ScannerStatsStore --> MySQL (MysqlPool)
//!         |-- pokestop, gym           (new forts, defenders, battles, quests)
//!         +-- pokemon_*_stats         (lifetime / today / IV leaderboards)
//! ```
//!
//! # Modules
//!
//! - [`mysql`] -- `MySQL` connection pool
//! - [`stats_store`] -- Scanner queries and row conversion
//! - [`error`] -- Shared error types

pub mod error;
pub mod mysql;
pub mod stats_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use mysql::{ACQUIRE_TIMEOUT, MysqlPool};
pub use stats_store::{
    FortRow, GymBattleRow, QuestRewardRow, ScannerStatsStore, SpeciesCountRow, SpeciesShinyRow,
};
