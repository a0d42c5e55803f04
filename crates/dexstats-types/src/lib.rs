//! Shared type definitions for the Dexstats dashboard.
//!
//! This crate is the single source of truth for the records a statistics
//! source returns and the rows a page view-model carries.
//!
//! # Modules
//!
//! - [`ids`] -- Integer id newtypes for catalog-backed entities
//! - [`enums`] -- Teams, gym slot counts, leaderboard windows, reward kinds
//! - [`structs`] -- Upstream records and display-ready rows

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{GymSlots, RewardKind, StatWindow, Team};
pub use ids::{ItemId, PokemonId};
pub use structs::{
    CountRow, DefenderRow, GeofenceCity, GruntType, GymDefenderStat, GymUnderAttackRecord,
    GymUnderAttackRow, IvRow, IvStat, NewGym, NewPokestop, PokemonCountStat, PokemonEntry,
    QuestReward,
};
