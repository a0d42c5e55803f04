//! Page aggregation core for the Dexstats dashboard.
//!
//! This crate turns upstream statistics and geofences into the flat
//! view-models the page templates render. It owns no HTTP code; the web
//! crate wires these pieces into an axum router.
//!
//! # Modules
//!
//! - [`config`] -- `dexstats-config.yaml` loading, validation, feature flags
//! - [`view_model`] -- [`ViewModel`] and the immutable [`BaseViewModel`]
//! - [`catalog`] -- Pokedex id to name catalog
//! - [`locale`] -- Translation table lookup
//! - [`format`] -- Display formatter (counts, slots, icons, names)
//! - [`geofence`] -- Geofence registry loaded from disk
//! - [`source`] -- [`StatsSource`] and [`GeofenceSource`] traits
//! - [`page`] -- [`Page`] and the startup-time [`FeatureGate`]
//! - [`compose`] -- [`PageComposer`], one fresh view-model per request

pub mod catalog;
pub mod compose;
pub mod config;
pub mod format;
pub mod geofence;
pub mod locale;
pub mod page;
pub mod source;
pub mod view_model;

// Re-export primary types for convenience.
pub use catalog::{CatalogError, Pokedex};
pub use compose::{ComposeError, GRUNT_TYPE_COUNT, LEADERBOARD_LIMIT, PageComposer, TOP_IV};
pub use config::{ConfigError, DashboardConfig, FeatureFlags};
pub use format::{DisplayFormatter, IconVariant, format_count, format_slots};
pub use geofence::{Geofence, GeofenceError, GeofenceRegistry};
pub use locale::{Locale, LocaleError};
pub use page::{AuthRoute, FeatureGate, Page};
pub use source::{GeofenceSource, SourceError, StatsSource};
pub use view_model::{BaseViewModel, ViewModel};
