//! Dashboard binary for Dexstats.
//!
//! This is the main entry point that wires together configuration, the
//! static catalogs, the scanner database, and the HTTP server. Everything
//! loaded here is read-only for the lifetime of the process; changing a
//! page toggle or the base view-model requires a restart.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `dexstats-config.yaml`
//! 3. Load the pokedex, locale, and geofences
//! 4. Connect to the scanner database
//! 5. Build the base view-model, composer, renderer, and feature gate
//! 6. Serve until `Ctrl-C`

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dexstats_core::{
    BaseViewModel, DashboardConfig, DisplayFormatter, FeatureGate, GeofenceRegistry, Locale,
    PageComposer, Pokedex,
};
use dexstats_db::{MysqlPool, ScannerStatsStore};
use dexstats_web::{AppState, MemorySessionStore, ServerConfig, TemplateRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerBinError;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "dexstats-config.yaml";

/// Environment variable overriding [`CONFIG_FILE`].
const CONFIG_ENV: &str = "DEXSTATS_CONFIG";

/// Application entry point for the dashboard.
///
/// # Errors
///
/// Returns an error if any initialization step or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("dexstats starting");

    run().await.map_err(|e| {
        tracing::error!(error = %e, "dexstats failed");
        Box::new(e) as Box<dyn std::error::Error>
    })
}

async fn run() -> Result<(), ServerBinError> {
    // 2. Load configuration.
    let config = load_config()?;
    let flags = config.feature_flags();
    info!(
        title = config.site.title,
        language = config.locale.language,
        port = config.server.port,
        ?flags,
        "Configuration loaded"
    );

    // 3. Static catalogs.
    let paths = &config.paths;
    let pokedex = Arc::new(Pokedex::load(&paths.pokedex)?);
    let locale = Arc::new(Locale::load(&paths.locales_dir, &config.locale.language)?);
    let geofences = Arc::new(GeofenceRegistry::load_dir(&paths.geofences_dir)?);

    // 4. Scanner database.
    let pool = MysqlPool::connect(&config.database).await?;
    let stats = Arc::new(ScannerStatsStore::new(
        pool.clone(),
        Arc::clone(&pokedex),
        Arc::clone(&locale),
    ));

    // 5. Request-independent state.
    let formatter = Arc::new(DisplayFormatter::new(
        pokedex,
        locale,
        &config.icons.pokemon_url,
        &config.locale.separator(),
    ));
    let base = Arc::new(BaseViewModel::from_config(&config)?);
    let composer = PageComposer::new(stats, geofences, base, formatter);

    let gate = FeatureGate::new(flags);
    let renderer = TemplateRenderer::from_dir(&paths.templates_dir);
    renderer.ensure_templates(&gate.pages())?;

    let state = Arc::new(AppState::new(
        composer,
        renderer,
        gate,
        Arc::new(MemorySessionStore::new()),
        &config.discord.login_path,
    ));

    // 6. Serve.
    let server_config = ServerConfig::from(&config.server);
    let served = dexstats_web::start_server(&server_config, state).await;
    pool.close().await;
    served?;

    info!("dexstats stopped");
    Ok(())
}

/// Load configuration from `DEXSTATS_CONFIG` or `dexstats-config.yaml`.
///
/// Falls back to defaults if the file does not exist.
fn load_config() -> Result<DashboardConfig, ServerBinError> {
    let config_path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    load_config_from(&config_path)
}

fn load_config_from(config_path: &Path) -> Result<DashboardConfig, ServerBinError> {
    if config_path.exists() {
        let config = DashboardConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        let mut config = DashboardConfig::default();
        config.database.apply_env_overrides();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_uses_defaults() {
        let config = load_config_from(Path::new("definitely-not-here.yaml"));
        let defaults = DashboardConfig::default();
        assert!(config.is_ok_and(|c| c.site == defaults.site && c.pages == defaults.pages));
    }
}
