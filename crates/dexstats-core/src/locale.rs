//! Translation table lookup.
//!
//! A locale is a flat JSON object of `key -> text` loaded from
//! `<locales_dir>/<language>.json`. Lookups never fail: a missing key
//! renders as the key itself, so an incomplete translation degrades to
//! visible keys rather than an error page.

use std::collections::BTreeMap;
use std::path::Path;

/// Errors that can occur when loading a locale file.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    /// The locale file exists but could not be read.
    #[error("failed to read locale {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The locale file is not a flat JSON object of strings.
    #[error("failed to parse locale: {0}")]
    Json(#[from] serde_json::Error),
}

/// A loaded translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    language: String,
    strings: BTreeMap<String, String>,
}

impl Locale {
    /// Load `<dir>/<language>.json`.
    ///
    /// A missing file yields an empty table (every lookup echoes its key)
    /// and is logged at `warn`.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] if the file exists but is unreadable or
    /// malformed.
    pub fn load(dir: &Path, language: &str) -> Result<Self, LocaleError> {
        let path = dir.join(format!("{language}.json"));
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Locale file not found, falling back to keys");
            return Ok(Self::empty(language));
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| LocaleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let locale = Self::parse(language, &contents)?;
        tracing::info!(language, strings = locale.strings.len(), "Locale loaded");
        Ok(locale)
    }

    /// Parse a translation table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::Json`] if the string is not a JSON object of
    /// strings.
    pub fn parse(language: &str, json: &str) -> Result<Self, LocaleError> {
        let strings = serde_json::from_str(json)?;
        Ok(Self {
            language: language.to_owned(),
            strings,
        })
    }

    /// A table with no translations.
    pub fn empty(language: &str) -> Self {
        Self {
            language: language.to_owned(),
            strings: BTreeMap::new(),
        }
    }

    /// Build a table from in-memory pairs.
    pub fn from_pairs<I, K, V>(language: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            language: language.to_owned(),
            strings: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The language code this table was loaded for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate `key`, echoing the key when no translation exists.
    pub fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }

    /// Translate `key`, using `fallback` when no translation exists.
    pub fn translate_or(&self, key: &str, fallback: &str) -> String {
        self.strings
            .get(key)
            .map_or_else(|| fallback.to_owned(), Clone::clone)
    }
}
