//! Static pokedex catalog: species id to display name.
//!
//! Loaded once at startup from a JSON object keyed by dex number
//! (`{"1": "Bulbasaur", "2": "Ivysaur", ...}`) and shared read-only.

use std::collections::BTreeMap;
use std::path::Path;

use dexstats_types::{PokemonEntry, PokemonId};

/// Errors that can occur when loading the pokedex.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The pokedex file could not be read.
    #[error("failed to read pokedex {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The pokedex is not a JSON object of strings.
    #[error("failed to parse pokedex: {0}")]
    Json(#[from] serde_json::Error),

    /// A key is not a dex number.
    #[error("invalid pokedex key {0:?}")]
    InvalidKey(String),
}

/// Read-only species name catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pokedex {
    names: BTreeMap<PokemonId, String>,
}

impl Pokedex {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dex = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), species = dex.len(), "Pokedex loaded");
        Ok(dex)
    }

    /// Parse the catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for invalid JSON and
    /// [`CatalogError::InvalidKey`] for keys that are not `u16` numbers.
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let names = raw
            .into_iter()
            .map(|(key, name)| {
                key.trim()
                    .parse::<u16>()
                    .map(|id| (PokemonId(id), name))
                    .map_err(|_parse| CatalogError::InvalidKey(key))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { names })
    }

    /// Build a catalog from in-memory pairs.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u16, N)>,
        N: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(id, name)| (PokemonId(id), name.into()))
                .collect(),
        }
    }

    /// Display name of a species, or `None` when the id is unknown.
    pub fn name(&self, id: PokemonId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// All species in dex order, as shown in the trackable pokemon list.
    pub fn entries(&self) -> Vec<PokemonEntry> {
        self.names
            .iter()
            .map(|(id, name)| PokemonEntry {
                id: *id,
                name: name.clone(),
            })
            .collect()
    }

    /// Number of species in the catalog.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog has no species.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_orders_entries_numerically() {
        let dex = Pokedex::parse(r#"{"10": "Caterpie", "2": "Ivysaur", "1": "Bulbasaur"}"#);
        assert!(dex.is_ok());
        let dex = dex.unwrap_or_default();
        let ids: Vec<u16> = dex.entries().iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 10]);
    }

    #[test]
    fn unknown_id_has_no_name() {
        let dex = Pokedex::from_entries([(25, "Pikachu")]);
        assert_eq!(dex.name(PokemonId(25)), Some("Pikachu"));
        assert_eq!(dex.name(PokemonId(9999)), None);
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let result = Pokedex::parse(r#"{"pikachu": "Pikachu"}"#);
        assert!(matches!(result, Err(CatalogError::InvalidKey(_))));
    }
}
