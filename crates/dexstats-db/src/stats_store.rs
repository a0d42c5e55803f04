//! Leaderboard and recent-activity queries over the scanner schema.
//!
//! Tables read: `pokestop`, `gym`, `pokemon_stats`, `pokemon_shiny_stats`
//! and `pokemon_iv_stats`. The scanner stores timestamps as unix seconds
//! and most ids as unsigned integers; every selected integer is cast to
//! `SIGNED` so rows decode into `i64` regardless of the column width, and
//! the conversion into `dexstats-types` records happens in Rust.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dexstats_core::{Locale, Pokedex, SourceError, StatsSource};
use dexstats_types::{
    GymDefenderStat, GymUnderAttackRecord, ItemId, IvStat, NewGym, NewPokestop, PokemonCountStat,
    PokemonId, QuestReward, RewardKind, StatWindow,
};

use crate::error::DbError;
use crate::mysql::MysqlPool;

/// How far back "new" pokestops and gyms reach, in seconds.
pub const NEW_WINDOW_SECS: i64 = 24 * 60 * 60;

const NEW_POKESTOPS_SQL: &str = r"SELECT id, name, lat, lon, url,
         CAST(first_seen_timestamp AS SIGNED) AS first_seen_timestamp
  FROM pokestop
  WHERE first_seen_timestamp > UNIX_TIMESTAMP() - ?
  ORDER BY first_seen_timestamp DESC";

const NEW_GYMS_SQL: &str = r"SELECT id, name, lat, lon, url,
         CAST(first_seen_timestamp AS SIGNED) AS first_seen_timestamp
  FROM gym
  WHERE first_seen_timestamp > UNIX_TIMESTAMP() - ?
  ORDER BY first_seen_timestamp DESC";

const GYM_DEFENDERS_SQL: &str = r"SELECT CAST(guarding_pokemon_id AS SIGNED) AS pokemon_id,
         COUNT(*) AS count
  FROM gym
  WHERE guarding_pokemon_id IS NOT NULL AND guarding_pokemon_id > 0
  GROUP BY guarding_pokemon_id
  ORDER BY count DESC, pokemon_id ASC
  LIMIT ?";

// `availble_slots` is the scanner's column name.
const GYMS_UNDER_ATTACK_SQL: &str = r"SELECT id, name, lat, lon, url,
         CAST(team_id AS SIGNED) AS team_id,
         CAST(availble_slots AS SIGNED) AS available_slots,
         CAST(updated AS SIGNED) AS updated
  FROM gym
  WHERE in_battle = 1
  ORDER BY updated DESC
  LIMIT ?";

const TOP_IV_SQL: &str = r"SELECT CAST(pokemon_id AS SIGNED) AS pokemon_id,
         CAST(SUM(count) AS SIGNED) AS count
  FROM pokemon_iv_stats
  WHERE iv >= ?
  GROUP BY pokemon_id
  ORDER BY count DESC, pokemon_id ASC
  LIMIT ?";

const LIFETIME_SQL: &str = r"SELECT CAST(s.pokemon_id AS SIGNED) AS pokemon_id,
         CAST(SUM(s.count) AS SIGNED) AS count,
         CAST(COALESCE((SELECT SUM(ss.count) FROM pokemon_shiny_stats ss
                        WHERE ss.pokemon_id = s.pokemon_id), 0) AS SIGNED) AS shiny
  FROM pokemon_stats s
  GROUP BY s.pokemon_id
  ORDER BY count DESC, pokemon_id ASC
  LIMIT ?";

const TODAY_SQL: &str = r"SELECT CAST(s.pokemon_id AS SIGNED) AS pokemon_id,
         CAST(SUM(s.count) AS SIGNED) AS count,
         CAST(COALESCE((SELECT SUM(ss.count) FROM pokemon_shiny_stats ss
                        WHERE ss.pokemon_id = s.pokemon_id AND ss.date = CURDATE()), 0) AS SIGNED) AS shiny
  FROM pokemon_stats s
  WHERE s.date = CURDATE()
  GROUP BY s.pokemon_id
  ORDER BY count DESC, pokemon_id ASC
  LIMIT ?";

const QUEST_REWARDS_SQL: &str = r"SELECT DISTINCT
         CAST(quest_reward_type AS SIGNED) AS reward_type,
         CAST(quest_pokemon_id AS SIGNED) AS pokemon_id,
         CAST(quest_item_id AS SIGNED) AS item_id
  FROM pokestop
  WHERE quest_reward_type IS NOT NULL
    AND quest_timestamp >= UNIX_TIMESTAMP(CURDATE())
  ORDER BY reward_type, pokemon_id, item_id";

/// Scanner reward type codes.
const REWARD_TYPE_ITEM: i64 = 2;
const REWARD_TYPE_STARDUST: i64 = 3;
const REWARD_TYPE_CANDY: i64 = 4;
const REWARD_TYPE_POKEMON: i64 = 7;

/// [`StatsSource`] backed by the scanner's `MySQL` database.
///
/// Holds the catalog and locale so quest rewards leave the store with a
/// display name attached.
#[derive(Debug, Clone)]
pub struct ScannerStatsStore {
    pool: MysqlPool,
    pokedex: Arc<Pokedex>,
    locale: Arc<Locale>,
}

impl ScannerStatsStore {
    /// Create a store over a connected pool.
    pub const fn new(pool: MysqlPool, pokedex: Arc<Pokedex>, locale: Arc<Locale>) -> Self {
        Self {
            pool,
            pokedex,
            locale,
        }
    }

    /// The underlying pool.
    pub const fn pool(&self) -> &MysqlPool {
        &self.pool
    }

    /// Pokestops first seen within [`NEW_WINDOW_SECS`], newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_new_pokestops(&self) -> Result<Vec<NewPokestop>, DbError> {
        let rows = sqlx::query_as::<_, FortRow>(NEW_POKESTOPS_SQL)
            .bind(NEW_WINDOW_SECS)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows.into_iter().map(FortRow::into_pokestop).collect())
    }

    /// Gyms first seen within [`NEW_WINDOW_SECS`], newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_new_gyms(&self) -> Result<Vec<NewGym>, DbError> {
        let rows = sqlx::query_as::<_, FortRow>(NEW_GYMS_SQL)
            .bind(NEW_WINDOW_SECS)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows.into_iter().map(FortRow::into_gym).collect())
    }

    /// Most common gym defenders.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_gym_defenders(&self, limit: u32) -> Result<Vec<GymDefenderStat>, DbError> {
        let rows = sqlx::query_as::<_, SpeciesCountRow>(GYM_DEFENDERS_SQL)
            .bind(limit)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(SpeciesCountRow::into_defender)
            .collect())
    }

    /// Gyms currently in battle, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_gyms_under_attack(
        &self,
        limit: u32,
    ) -> Result<Vec<GymUnderAttackRecord>, DbError> {
        let rows = sqlx::query_as::<_, GymBattleRow>(GYMS_UNDER_ATTACK_SQL)
            .bind(limit)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows.into_iter().map(GymBattleRow::into_record).collect())
    }

    /// Species with the most spawns at or above `iv` percent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_top_iv(&self, iv: u8, limit: u32) -> Result<Vec<IvStat>, DbError> {
        let rows = sqlx::query_as::<_, SpeciesCountRow>(TOP_IV_SQL)
            .bind(iv)
            .bind(limit)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_iv_stat(iv))
            .collect())
    }

    /// Most-seen species over `window`, with shiny counts.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_top_pokemon(
        &self,
        window: StatWindow,
        limit: u32,
    ) -> Result<Vec<PokemonCountStat>, DbError> {
        let sql = match window {
            StatWindow::Lifetime => LIFETIME_SQL,
            StatWindow::Today => TODAY_SQL,
        };
        let rows = sqlx::query_as::<_, SpeciesShinyRow>(sql)
            .bind(limit)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(SpeciesShinyRow::into_stat)
            .collect())
    }

    /// Distinct rewards of quests issued today.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Mysql`] if the query fails.
    pub async fn query_quest_rewards(&self) -> Result<Vec<QuestReward>, DbError> {
        let rows = sqlx::query_as::<_, QuestRewardRow>(QUEST_REWARDS_SQL)
            .fetch_all(self.pool.pool())
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_reward(&self.pokedex, &self.locale))
            .collect())
    }
}

impl StatsSource for ScannerStatsStore {
    async fn new_pokestops(&self) -> Result<Vec<NewPokestop>, SourceError> {
        Ok(self.query_new_pokestops().await?)
    }

    async fn new_gyms(&self) -> Result<Vec<NewGym>, SourceError> {
        Ok(self.query_new_gyms().await?)
    }

    async fn gym_defenders(&self, limit: u32) -> Result<Vec<GymDefenderStat>, SourceError> {
        Ok(self.query_gym_defenders(limit).await?)
    }

    async fn gyms_under_attack(&self, limit: u32) -> Result<Vec<GymUnderAttackRecord>, SourceError> {
        Ok(self.query_gyms_under_attack(limit).await?)
    }

    async fn top_pokemon_iv_stats(&self, iv: u8, limit: u32) -> Result<Vec<IvStat>, SourceError> {
        Ok(self.query_top_iv(iv, limit).await?)
    }

    async fn top_pokemon_stats(
        &self,
        window: StatWindow,
        limit: u32,
    ) -> Result<Vec<PokemonCountStat>, SourceError> {
        Ok(self.query_top_pokemon(window, limit).await?)
    }

    async fn quest_rewards(&self) -> Result<Vec<QuestReward>, SourceError> {
        Ok(self.query_quest_rewards().await?)
    }
}

// =============================================================================
// Row types
// =============================================================================

/// A pokestop or gym row from the "new" queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FortRow {
    /// Scanner fort id.
    pub id: String,
    /// Display name, unknown until the fort has been visited.
    pub name: Option<String>,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Image URL.
    pub url: Option<String>,
    /// Unix seconds.
    pub first_seen_timestamp: Option<i64>,
}

impl FortRow {
    /// Convert into a [`NewPokestop`].
    pub fn into_pokestop(self) -> NewPokestop {
        NewPokestop {
            first_seen: timestamp(self.first_seen_timestamp),
            id: self.id,
            name: self.name,
            lat: self.lat,
            lon: self.lon,
            url: self.url,
        }
    }

    /// Convert into a [`NewGym`].
    pub fn into_gym(self) -> NewGym {
        NewGym {
            first_seen: timestamp(self.first_seen_timestamp),
            id: self.id,
            name: self.name,
            lat: self.lat,
            lon: self.lon,
            url: self.url,
        }
    }
}

/// `(pokemon_id, count)` aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpeciesCountRow {
    /// Species id.
    pub pokemon_id: i64,
    /// Aggregated count.
    pub count: Option<i64>,
}

impl SpeciesCountRow {
    /// Convert into a [`GymDefenderStat`], dropping ids that do not fit a `u16`.
    pub fn into_defender(self) -> Option<GymDefenderStat> {
        Some(GymDefenderStat {
            pokemon_id: pokemon_id(self.pokemon_id)?,
            count: count(self.count),
        })
    }

    /// Convert into an [`IvStat`] for the `iv` threshold it was queried at.
    pub fn into_iv_stat(self, iv: u8) -> Option<IvStat> {
        Some(IvStat {
            pokemon_id: pokemon_id(self.pokemon_id)?,
            iv: f64::from(iv),
            count: count(self.count),
        })
    }
}

/// `(pokemon_id, count, shiny)` aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpeciesShinyRow {
    /// Species id.
    pub pokemon_id: i64,
    /// Total sightings.
    pub count: Option<i64>,
    /// Shiny sightings.
    pub shiny: Option<i64>,
}

impl SpeciesShinyRow {
    /// Convert into a [`PokemonCountStat`], dropping ids that do not fit a `u16`.
    pub fn into_stat(self) -> Option<PokemonCountStat> {
        Some(PokemonCountStat {
            pokemon_id: pokemon_id(self.pokemon_id)?,
            count: count(self.count),
            shiny: count(self.shiny),
        })
    }
}

/// A gym in battle.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GymBattleRow {
    /// Scanner gym id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Image URL.
    pub url: Option<String>,
    /// Controlling team.
    pub team_id: Option<i64>,
    /// Open defender slots as reported; may be missing or out of range.
    pub available_slots: Option<i64>,
    /// Unix seconds of the last update.
    pub updated: Option<i64>,
}

impl GymBattleRow {
    /// Convert into a [`GymUnderAttackRecord`].
    ///
    /// The slot count is passed through untouched; clamping happens in the
    /// display formatter.
    pub fn into_record(self) -> GymUnderAttackRecord {
        let team_id = self
            .team_id
            .map_or(0, |id| u8::try_from(id).unwrap_or(u8::MAX));
        GymUnderAttackRecord {
            id: self.id,
            name: self.name,
            lat: self.lat,
            lon: self.lon,
            url: self.url,
            team_id,
            available_slots: self.available_slots,
            updated: timestamp(self.updated),
        }
    }
}

/// A distinct quest reward.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestRewardRow {
    /// Scanner reward type code.
    pub reward_type: i64,
    /// Encounter species, for pokemon and candy rewards.
    pub pokemon_id: Option<i64>,
    /// Item id, for item rewards.
    pub item_id: Option<i64>,
}

impl QuestRewardRow {
    /// Convert into a named [`QuestReward`].
    pub fn into_reward(self, pokedex: &Pokedex, locale: &Locale) -> QuestReward {
        let kind = reward_kind(self.reward_type);
        let pokemon_id = self
            .pokemon_id
            .filter(|id| *id > 0)
            .and_then(pokemon_id);
        let item_id = self
            .item_id
            .and_then(|id| u16::try_from(id).ok())
            .filter(|id| *id > 0)
            .map(ItemId::new);

        let name = match kind {
            RewardKind::Pokemon => pokemon_id
                .and_then(|id| pokedex.name(id).map(str::to_owned))
                .unwrap_or_else(|| locale.translate_or("unknown_pokemon", "Unknown Pokemon")),
            RewardKind::Item => item_id.map_or_else(
                || locale.translate_or("unknown_item", "Unknown Item"),
                |id| locale.translate_or(&format!("item_{id}"), &format!("Item {id}")),
            ),
            RewardKind::Stardust => locale.translate_or("stardust", "Stardust"),
            RewardKind::Candy => {
                let candy = locale.translate_or("candy", "Candy");
                pokemon_id
                    .and_then(|id| pokedex.name(id))
                    .map_or_else(
                        || locale.translate_or("rare_candy", "Rare Candy"),
                        |species| format!("{species} {candy}"),
                    )
            }
            RewardKind::Other => locale.translate_or(
                &format!("quest_reward_{}", self.reward_type),
                &format!("Reward {}", self.reward_type),
            ),
        };

        QuestReward {
            kind,
            pokemon_id,
            item_id,
            name,
        }
    }
}

/// Map a scanner reward type code to a [`RewardKind`].
pub const fn reward_kind(code: i64) -> RewardKind {
    match code {
        REWARD_TYPE_POKEMON => RewardKind::Pokemon,
        REWARD_TYPE_ITEM => RewardKind::Item,
        REWARD_TYPE_STARDUST => RewardKind::Stardust,
        REWARD_TYPE_CANDY => RewardKind::Candy,
        _ => RewardKind::Other,
    }
}

// Id 0 is kept: an uncatalogued species still holds its leaderboard slot.
fn pokemon_id(raw: i64) -> Option<PokemonId> {
    match u16::try_from(raw) {
        Ok(id) => Some(PokemonId::new(id)),
        Err(_) => {
            tracing::warn!(pokemon_id = raw, "Dropping row with invalid pokemon id");
            None
        }
    }
}

fn count(raw: Option<i64>) -> Option<u64> {
    raw.and_then(|n| u64::try_from(n).ok())
}

fn timestamp(secs: Option<i64>) -> DateTime<Utc> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .unwrap_or_default()
}
