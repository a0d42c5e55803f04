//! Page composition: upstream queries in, one fresh view-model out.
//!
//! Each call starts from [`BaseViewModel::fresh`], so concurrent requests
//! never share a mutation target. Independent queries are issued together
//! and joined before anything is merged; the merge itself runs in a fixed
//! order, so the result does not depend on which query finished first.
//!
//! # Keys per page
//!
//! | Page | Keys added to the base |
//! |------|------------------------|
//! | index | `new_pokestops`, `new_gyms`, `top10_100iv_pokemon`, `lifetime`, `today`, `gym_defenders`, `gyms_under_attack` |
//! | pokemon | `pokemon` (viewport scalars come from the base) |
//! | raids | `cities`, `pokemon` |
//! | gyms | `cities` |
//! | quests | `cities`, `rewards` |
//! | invasions | `cities`, `grunt_types` |
//! | nests | `cities` |

use std::sync::Arc;

use dexstats_types::{GruntType, StatWindow};

use crate::format::DisplayFormatter;
use crate::page::Page;
use crate::source::{GeofenceSource, SourceError, StatsSource};
use crate::view_model::{BaseViewModel, ViewModel};

/// Size of every home page leaderboard.
pub const LEADERBOARD_LIMIT: u32 = 10;

/// IV percentage of the "perfect IV" leaderboard.
pub const TOP_IV: u8 = 100;

/// Number of grunt types on the invasions page (ids `0..=50`).
pub const GRUNT_TYPE_COUNT: u8 = 51;

/// Errors that abort a page composition.
///
/// No partial view-model is ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// An upstream query failed.
    #[error("upstream source error: {0}")]
    Source(#[from] SourceError),

    /// A value could not be placed into the view-model.
    #[error("view-model serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Builds the view-model of every page.
#[derive(Debug)]
pub struct PageComposer<S, G> {
    stats: Arc<S>,
    geofences: Arc<G>,
    base: Arc<BaseViewModel>,
    formatter: Arc<DisplayFormatter>,
}

impl<S, G> Clone for PageComposer<S, G> {
    fn clone(&self) -> Self {
        Self {
            stats: Arc::clone(&self.stats),
            geofences: Arc::clone(&self.geofences),
            base: Arc::clone(&self.base),
            formatter: Arc::clone(&self.formatter),
        }
    }
}

impl<S, G> PageComposer<S, G>
where
    S: StatsSource,
    G: GeofenceSource,
{
    /// Create a composer over shared, read-only collaborators.
    pub const fn new(
        stats: Arc<S>,
        geofences: Arc<G>,
        base: Arc<BaseViewModel>,
        formatter: Arc<DisplayFormatter>,
    ) -> Self {
        Self {
            stats,
            geofences,
            base,
            formatter,
        }
    }

    /// The base snapshot every composition starts from.
    pub fn base(&self) -> &BaseViewModel {
        &self.base
    }

    /// Compose the view-model of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError`] if any query of the page fails.
    pub async fn compose(&self, page: Page) -> Result<ViewModel, ComposeError> {
        let view_model = match page {
            Page::Index => self.home().await,
            Page::Pokemon => self.pokemon(),
            Page::Raids => self.raids().await,
            Page::Gyms => self.gyms().await,
            Page::Quests => self.quests().await,
            Page::Invasions => self.invasions().await,
            Page::Nests => self.nests().await,
        }?;
        tracing::debug!(page = page.template(), keys = view_model.len(), "Page composed");
        Ok(view_model)
    }

    /// Home page: seven independent queries fanned out and joined.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Source`] with the first query failure.
    pub async fn home(&self) -> Result<ViewModel, ComposeError> {
        let stats = &*self.stats;
        let (new_pokestops, new_gyms, defenders, under_attack, top_iv, lifetime, today) = tokio::try_join!(
            stats.new_pokestops(),
            stats.new_gyms(),
            stats.gym_defenders(LEADERBOARD_LIMIT),
            stats.gyms_under_attack(LEADERBOARD_LIMIT),
            stats.top_pokemon_iv_stats(TOP_IV, LEADERBOARD_LIMIT),
            stats.top_pokemon_stats(StatWindow::Lifetime, LEADERBOARD_LIMIT),
            stats.top_pokemon_stats(StatWindow::Today, LEADERBOARD_LIMIT),
        )?;

        let f = &*self.formatter;
        let gym_defenders: Vec<_> = defenders.iter().map(|d| f.defender_row(d)).collect();
        let gyms_under_attack: Vec<_> = under_attack
            .iter()
            .map(|g| f.gym_under_attack_row(g))
            .collect();
        let top_iv: Vec<_> = top_iv.iter().map(|s| f.iv_row(s)).collect();
        let lifetime: Vec<_> = lifetime.iter().map(|s| f.count_row(s)).collect();
        let today: Vec<_> = today.iter().map(|s| f.count_row(s)).collect();

        let mut vm = self.base.fresh();
        vm.insert("new_pokestops", &new_pokestops)?;
        vm.insert("new_gyms", &new_gyms)?;
        vm.insert("top10_100iv_pokemon", &top_iv)?;
        vm.insert("lifetime", &lifetime)?;
        vm.insert("today", &today)?;
        vm.insert("gym_defenders", &gym_defenders)?;
        vm.insert("gyms_under_attack", &gyms_under_attack)?;
        Ok(vm)
    }

    /// Pokemon map page: trackable species plus the map viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Serialize`] only.
    pub fn pokemon(&self) -> Result<ViewModel, ComposeError> {
        let mut vm = self.base.fresh();
        vm.insert("pokemon", &self.formatter.pokedex().entries())?;
        Ok(vm)
    }

    /// Raids page: cities and trackable species.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Source`] if the geofence query fails.
    pub async fn raids(&self) -> Result<ViewModel, ComposeError> {
        let mut vm = self.with_cities().await?;
        vm.insert("pokemon", &self.formatter.pokedex().entries())?;
        Ok(vm)
    }

    /// Gyms page: cities only.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Source`] if the geofence query fails.
    pub async fn gyms(&self) -> Result<ViewModel, ComposeError> {
        self.with_cities().await
    }

    /// Quests page: cities and the active reward catalog, fetched together.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Source`] with the first query failure.
    pub async fn quests(&self) -> Result<ViewModel, ComposeError> {
        let (cities, rewards) =
            tokio::try_join!(self.geofences.cities(), self.stats.quest_rewards())?;
        let mut vm = self.base.fresh();
        vm.insert("cities", &cities)?;
        vm.insert("rewards", &rewards)?;
        Ok(vm)
    }

    /// Invasions page: cities and the fixed list of 51 grunt types.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Source`] if the geofence query fails.
    pub async fn invasions(&self) -> Result<ViewModel, ComposeError> {
        let mut vm = self.with_cities().await?;
        vm.insert("grunt_types", &self.grunt_types())?;
        Ok(vm)
    }

    /// Nests page: cities only.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Source`] if the geofence query fails.
    pub async fn nests(&self) -> Result<ViewModel, ComposeError> {
        self.with_cities().await
    }

    /// Grunt types `0..=50` with localized names, in id order.
    pub fn grunt_types(&self) -> Vec<GruntType> {
        (0..GRUNT_TYPE_COUNT)
            .map(|id| GruntType {
                id,
                name: self.formatter.grunt_name(id),
            })
            .collect()
    }

    /// A fresh view-model with `cities` filled in.
    async fn with_cities(&self) -> Result<ViewModel, ComposeError> {
        let cities = self.geofences.cities().await?;
        let mut vm = self.base.fresh();
        vm.insert("cities", &cities)?;
        Ok(vm)
    }
}
