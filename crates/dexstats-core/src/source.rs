//! Upstream data source traits.
//!
//! Page composition pulls from two collaborators: a [`StatsSource`] that
//! answers ranked/aggregated statistics queries, and a [`GeofenceSource`]
//! that lists the configured cities. Both are async; every call is a
//! suspension point of the request that issued it.
//!
//! The methods return `impl Future + Send` so implementations can be
//! written with plain `async fn` while composed futures stay usable from
//! multi-threaded axum handlers.

use std::future::Future;

use dexstats_types::{
    GeofenceCity, GymDefenderStat, GymUnderAttackRecord, IvStat, NewGym, NewPokestop,
    PokemonCountStat, QuestReward, StatWindow,
};

/// Errors reported by an upstream source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The query ran and failed.
    #[error("query failed: {0}")]
    Query(String),

    /// The source could not be reached.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Ranked and aggregated statistics from the scanner.
///
/// Implementations return results already ordered; callers never
/// re-sort them.
pub trait StatsSource: Send + Sync {
    /// Pokestops first seen recently.
    fn new_pokestops(&self) -> impl Future<Output = Result<Vec<NewPokestop>, SourceError>> + Send;

    /// Gyms first seen recently.
    fn new_gyms(&self) -> impl Future<Output = Result<Vec<NewGym>, SourceError>> + Send;

    /// The `limit` species defending the most gyms.
    fn gym_defenders(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<GymDefenderStat>, SourceError>> + Send;

    /// Up to `limit` gyms currently in battle, most recently updated first.
    fn gyms_under_attack(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<GymUnderAttackRecord>, SourceError>> + Send;

    /// The `limit` species with the most spawns at or above `iv` percent.
    fn top_pokemon_iv_stats(
        &self,
        iv: u8,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<IvStat>, SourceError>> + Send;

    /// The `limit` most-seen species over `window`.
    fn top_pokemon_stats(
        &self,
        window: StatWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<PokemonCountStat>, SourceError>> + Send;

    /// Rewards of currently active quests.
    fn quest_rewards(&self) -> impl Future<Output = Result<Vec<QuestReward>, SourceError>> + Send;
}

/// The configured cities, in registry order.
pub trait GeofenceSource: Send + Sync {
    /// `{name}` projections of every region.
    fn cities(&self) -> impl Future<Output = Result<Vec<GeofenceCity>, SourceError>> + Send;
}
