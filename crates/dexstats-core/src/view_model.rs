//! Page view-models and the immutable base snapshot they start from.
//!
//! Every page response is composed into its own [`ViewModel`]. The shared
//! [`BaseViewModel`] is built once at startup and only ever read; each
//! request calls [`BaseViewModel::fresh`] to get an owned copy it can fill
//! in without another request observing the result.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::compose::ComposeError;
use crate::config::{DashboardConfig, FeatureFlags};

/// The flat key/value mapping handed to the template renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViewModel {
    fields: Map<String, Value>,
}

impl ViewModel {
    /// An empty view-model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` and store it under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Serialize`] if `value` cannot be represented
    /// as JSON.
    pub fn insert<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), ComposeError> {
        let value = serde_json::to_value(value)?;
        self.fields.insert(key.to_owned(), value);
        Ok(())
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Keys in insertion-independent (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no keys are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying JSON object.
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Process-wide defaults merged into every page.
///
/// Constructed once from [`DashboardConfig`] and never mutated afterwards.
/// Requests receive copies through [`Self::fresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseViewModel {
    fields: ViewModel,
}

impl BaseViewModel {
    /// Build the snapshot from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Serialize`] if a configured value cannot be
    /// represented as JSON (e.g. a non-finite coordinate).
    pub fn from_config(config: &DashboardConfig) -> Result<Self, ComposeError> {
        let mut fields = ViewModel::new();
        fields.insert("title", &config.site.title)?;
        fields.insert("header_title", &config.site.header_title)?;
        fields.insert("discord_invite", &config.site.discord_invite)?;
        fields.insert("locale", &config.locale.language)?;

        let map = &config.map;
        fields.insert("tileserver", &map.tileserver)?;
        fields.insert("start_lat", &map.start_lat)?;
        fields.insert("start_lon", &map.start_lon)?;
        fields.insert("start_zoom", &map.start_zoom)?;
        fields.insert("min_zoom", &map.min_zoom)?;
        fields.insert("max_zoom", &map.max_zoom)?;

        insert_flags(&mut fields, config.feature_flags())?;
        Ok(Self { fields })
    }

    /// An owned copy for one request to compose into.
    pub fn fresh(&self) -> ViewModel {
        self.fields.clone()
    }

    /// Read a base field without copying the whole snapshot.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Store each flag as `<page>_enabled` so templates can hide nav links.
fn insert_flags(fields: &mut ViewModel, flags: FeatureFlags) -> Result<(), ComposeError> {
    fields.insert("pokemon_enabled", &flags.pokemon)?;
    fields.insert("raids_enabled", &flags.raids)?;
    fields.insert("gyms_enabled", &flags.gyms)?;
    fields.insert("quests_enabled", &flags.quests)?;
    fields.insert("invasions_enabled", &flags.invasions)?;
    fields.insert("nests_enabled", &flags.nests)?;
    fields.insert("discord_enabled", &flags.discord)?;
    Ok(())
}
