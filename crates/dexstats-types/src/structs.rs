//! Record and row structs for the Dexstats dashboard.
//!
//! Two families live here:
//!
//! - **Records** are what a statistics source returns, mirroring the
//!   scanner database rather than any page.
//! - **Rows** are display-ready projections placed into a page view-model.
//!   Every count is already a formatted string and every name has already
//!   been resolved (or left empty) by the display formatter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::RewardKind;
use crate::ids::{ItemId, PokemonId};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A pokestop first seen by the scanner recently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPokestop {
    /// Scanner fort id.
    pub id: String,
    /// Pokestop name, when the scanner has resolved it.
    pub name: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Image URL reported by the game.
    pub url: Option<String>,
    /// When the scanner first saw it.
    pub first_seen: DateTime<Utc>,
}

/// A gym first seen by the scanner recently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGym {
    /// Scanner fort id.
    pub id: String,
    /// Gym name, when the scanner has resolved it.
    pub name: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Image URL reported by the game.
    pub url: Option<String>,
    /// When the scanner first saw it.
    pub first_seen: DateTime<Utc>,
}

/// How many gyms a species is currently defending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymDefenderStat {
    /// Defending species.
    pub pokemon_id: PokemonId,
    /// Number of gyms it guards.
    pub count: Option<u64>,
}

/// A gym currently in battle, straight from the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymUnderAttackRecord {
    /// Scanner fort id.
    pub id: String,
    /// Gym name, when known.
    pub name: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Image URL reported by the game.
    pub url: Option<String>,
    /// Raw scanner team id.
    pub team_id: u8,
    /// Raw open-slot count. Unvalidated: may be absent or out of range.
    pub available_slots: Option<i64>,
    /// Last time the scanner updated the gym.
    pub updated: DateTime<Utc>,
}

/// How many spawns of a species reached a given IV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvStat {
    /// Species.
    pub pokemon_id: PokemonId,
    /// IV percentage, `0..=100`.
    pub iv: f64,
    /// Number of spawns.
    pub count: Option<u64>,
}

/// Spawn and shiny totals of a species over a [`StatWindow`](crate::StatWindow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonCountStat {
    /// Species.
    pub pokemon_id: PokemonId,
    /// Number of spawns.
    pub count: Option<u64>,
    /// Number of shiny encounters.
    pub shiny: Option<u64>,
}

/// One entry in the active quest reward catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    /// Reward category.
    pub kind: RewardKind,
    /// Pokemon reward, for [`RewardKind::Pokemon`].
    pub pokemon_id: Option<PokemonId>,
    /// Item reward, for [`RewardKind::Item`].
    pub item_id: Option<ItemId>,
    /// Display name, resolved by the source.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A named region, projected for a page's city selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeofenceCity {
    /// Region name.
    pub name: String,
}

/// A `(name, id)` entry of the trackable pokemon list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEntry {
    /// Species.
    pub id: PokemonId,
    /// Display name.
    pub name: String,
}

/// A grunt type of the invasions page selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GruntType {
    /// Grunt type id, `0..=50`.
    pub id: u8,
    /// Localized name.
    pub name: String,
}

/// A row of the top gym defenders leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderRow {
    /// Defending species.
    pub id: PokemonId,
    /// Species name; `None` for ids missing from the pokedex.
    pub name: Option<String>,
    /// Formatted gym count.
    pub count: String,
    /// Species icon.
    pub image_url: String,
}

/// A row of the top IV leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvRow {
    /// Species.
    pub pokemon_id: PokemonId,
    /// Species name; `None` for ids missing from the pokedex.
    pub name: Option<String>,
    /// IV percentage.
    pub iv: f64,
    /// Formatted spawn count.
    pub count: String,
    /// Species icon.
    pub image_url: String,
}

/// A row of the lifetime or today leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    /// Species.
    pub pokemon_id: PokemonId,
    /// Species name; `None` for ids missing from the pokedex.
    pub name: Option<String>,
    /// Formatted shiny count.
    pub shiny: String,
    /// Formatted spawn count.
    pub count: String,
    /// Species icon.
    pub image_url: String,
}

/// A gym under attack, shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymUnderAttackRow {
    /// Scanner fort id.
    pub id: String,
    /// Gym name, when known.
    pub name: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Image URL reported by the game.
    pub url: Option<String>,
    /// Raw scanner team id.
    pub team_id: u8,
    /// Lowercased localized team name.
    pub team: String,
    /// `"Full"` or `"<n>/6"`.
    pub slots_available: String,
}
