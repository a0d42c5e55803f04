//! Error types for the dashboard binary.
//!
//! [`ServerBinError`] is the top-level error type that wraps every
//! failure mode during startup and serving.

/// Top-level error for the dashboard binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerBinError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: dexstats_core::ConfigError,
    },

    /// The pokedex could not be loaded.
    #[error("pokedex error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: dexstats_core::CatalogError,
    },

    /// The locale file could not be loaded.
    #[error("locale error: {source}")]
    Locale {
        /// The underlying locale error.
        #[from]
        source: dexstats_core::LocaleError,
    },

    /// Geofence files could not be loaded.
    #[error("geofence error: {source}")]
    Geofence {
        /// The underlying geofence error.
        #[from]
        source: dexstats_core::GeofenceError,
    },

    /// The base view-model could not be built.
    #[error("view-model error: {source}")]
    Compose {
        /// The underlying compose error.
        #[from]
        source: dexstats_core::ComposeError,
    },

    /// The scanner database could not be reached.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        #[from]
        source: dexstats_db::DbError,
    },

    /// A page template is missing or broken.
    #[error("template error: {source}")]
    Render {
        /// The underlying render error.
        #[from]
        source: dexstats_web::RenderError,
    },

    /// The HTTP server failed to start or crashed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: dexstats_web::ServerError,
    },
}
