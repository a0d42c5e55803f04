//! Geofence registry: the named regions ("cities") the per-city pages offer.
//!
//! Geofences are read from a directory of `.txt` files at startup. Each
//! file holds one or more fences:
//!
//! ```text
//! [Springfield]
//! 34.0101,-117.0101
//! 34.0202,-117.0101
//! 34.0202,-117.0202
//! ```
//!
//! Files are read in file-name order and fences keep their order within a
//! file, so the registry order is stable across restarts.

use std::path::Path;

use dexstats_types::GeofenceCity;

use crate::source::{GeofenceSource, SourceError};

/// Errors that can occur when loading geofences.
#[derive(Debug, thiserror::Error)]
pub enum GeofenceError {
    /// A geofence file or the directory listing could not be read.
    #[error("failed to read geofences at {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line is neither a `[name]` header nor a `lat,lon` pair.
    #[error("{file}:{line}: expected `[name]` or `lat,lon`")]
    Parse {
        /// File name.
        file: String,
        /// One-based line number.
        line: usize,
    },
}

/// A named polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Geofence {
    /// Region name shown in the city selector.
    pub name: String,
    /// Vertices as `(lat, lon)` pairs.
    pub polygon: Vec<(f64, f64)>,
}

/// Ordered, read-only set of geofences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeofenceRegistry {
    geofences: Vec<Geofence>,
}

impl GeofenceRegistry {
    /// Wrap an already-built list, keeping its order.
    pub const fn from_geofences(geofences: Vec<Geofence>) -> Self {
        Self { geofences }
    }

    /// Load every `*.txt` file in `dir`, sorted by file name.
    ///
    /// A missing directory yields an empty registry and is logged at `warn`.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceError`] if a file cannot be read or parsed.
    pub fn load_dir(dir: &Path) -> Result<Self, GeofenceError> {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Geofence directory not found, no cities configured");
            return Ok(Self::default());
        }

        let io_err = |source| GeofenceError::Io {
            path: dir.display().to_string(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "txt") {
                files.push(path);
            }
        }
        files.sort();

        let mut geofences = Vec::new();
        for path in &files {
            let contents = std::fs::read_to_string(path).map_err(|source| GeofenceError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let file = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            geofences.extend(parse_geofences(&file, &contents)?);
        }

        tracing::info!(files = files.len(), geofences = geofences.len(), "Geofences loaded");
        Ok(Self { geofences })
    }

    /// All geofences in registry order.
    pub fn geofences(&self) -> &[Geofence] {
        &self.geofences
    }

    /// `{name}` projections in registry order.
    pub fn list_cities(&self) -> Vec<GeofenceCity> {
        self.geofences
            .iter()
            .map(|fence| GeofenceCity {
                name: fence.name.clone(),
            })
            .collect()
    }
}

impl GeofenceSource for GeofenceRegistry {
    async fn cities(&self) -> Result<Vec<GeofenceCity>, SourceError> {
        Ok(self.list_cities())
    }
}

/// Parse the contents of one geofence file.
///
/// Blank lines and lines starting with `#` are ignored.
///
/// # Errors
///
/// Returns [`GeofenceError::Parse`] for coordinates before the first
/// header or lines that are not `lat,lon`.
pub fn parse_geofences(file: &str, contents: &str) -> Result<Vec<Geofence>, GeofenceError> {
    let mut fences: Vec<Geofence> = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_err = || GeofenceError::Parse {
            file: file.to_owned(),
            line: idx.saturating_add(1),
        };

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            fences.push(Geofence {
                name: name.trim().to_owned(),
                polygon: Vec::new(),
            });
            continue;
        }

        let (lat, lon) = line.split_once(',').ok_or_else(parse_err)?;
        let lat: f64 = lat.trim().parse().map_err(|_e| parse_err())?;
        let lon: f64 = lon.trim().parse().map_err(|_e| parse_err())?;
        fences
            .last_mut()
            .ok_or_else(parse_err)?
            .polygon
            .push((lat, lon));
    }
    Ok(fences)
}
