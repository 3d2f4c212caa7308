use std::path::PathBuf;
use std::time::Duration;

use engine::{LoopConfig, Scene};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::catalog::CatalogSource;
use super::shell::RoomRunApp;

pub(crate) const CATALOG_URL_ENV_VAR: &str = "ROOM_RUN_CATALOG_URL";
pub(crate) const CATALOG_PATH_ENV_VAR: &str = "ROOM_RUN_CATALOG_PATH";
pub(crate) const FETCH_TIMEOUT_ENV_VAR: &str = "ROOM_RUN_FETCH_TIMEOUT_MS";
pub(crate) const SEED_ENV_VAR: &str = "ROOM_RUN_SEED";
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5_000);

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GameConfig {
    pub(crate) catalog_source: CatalogSource,
    /// Fixed seed for loot/enemy/door randomness; `None` seeds from the OS.
    pub(crate) seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_source: CatalogSource::Embedded,
            seed: None,
        }
    }
}

impl GameConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// URL wins over path; neither set means the embedded catalog.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let catalog_source = match (read(CATALOG_URL_ENV_VAR), read(CATALOG_PATH_ENV_VAR)) {
            (Some(url), _) => {
                let timeout = read(FETCH_TIMEOUT_ENV_VAR)
                    .and_then(|raw| parse_or_warn::<u64>(FETCH_TIMEOUT_ENV_VAR, &raw))
                    .filter(|ms| *ms > 0)
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_FETCH_TIMEOUT);
                CatalogSource::Http { url, timeout }
            }
            (None, Some(path)) => CatalogSource::File(PathBuf::from(path)),
            (None, None) => CatalogSource::Embedded,
        };
        let seed = read(SEED_ENV_VAR).and_then(|raw| parse_or_warn::<u64>(SEED_ENV_VAR, &raw));

        Self {
            catalog_source,
            seed,
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(env_var: &'static str, raw: &str) -> Option<T> {
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(env_var, value = raw, "invalid env var value; using default");
            None
        }
    }
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Room Run Startup ===");

    let game_config = GameConfig::from_env();
    info!(
        catalog_origin = %game_config.catalog_source.origin(),
        seeded = game_config.seed.is_some(),
        "game_config"
    );
    let config = LoopConfig {
        window_title: "Room Run".to_string(),
        ..LoopConfig::default()
    };

    AppWiring {
        config,
        scene: Box::new(RoomRunApp::new(game_config)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
