//! Application-level configuration loading: storage backend selection and league defaults.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::scheduler::MAX_WEEKS;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LEAGUE_FIXTURES_CONFIG_PATH";
/// Environment variable that overrides the configured storage backend.
const STORAGE_ENV: &str = "LEAGUE_STORAGE";
/// Number of weeks generated when a request does not say otherwise.
const DEFAULT_WEEKS: u32 = 8;

/// Backend used to persist leagues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store, lost on restart.
    #[default]
    Memory,
    /// MongoDB, configured through `MONGO_URI` / `MONGO_DB`.
    Mongo,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(format!("unknown storage backend `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    storage: StorageBackend,
    default_weeks: u32,
}

impl AppConfig {
    /// Load the configuration from disk and the environment, falling back to defaults.
    pub fn load() -> Self {
        let mut config = Self::from_file(&resolve_config_path());

        if let Ok(value) = env::var(STORAGE_ENV) {
            match value.parse::<StorageBackend>() {
                Ok(storage) => config.storage = storage,
                Err(err) => warn!(error = %err, "ignoring {STORAGE_ENV}"),
            }
        }

        config
    }

    fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        storage = ?app_config.storage,
                        default_weeks = app_config.default_weeks,
                        "loaded config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Selected storage backend.
    pub fn storage(&self) -> StorageBackend {
        self.storage
    }

    /// Weeks generated when a schedule request leaves the count out.
    pub fn default_weeks(&self) -> u32 {
        self.default_weeks
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            default_weeks: DEFAULT_WEEKS,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    storage: StorageBackend,
    #[serde(default)]
    default_weeks: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            storage: value.storage,
            default_weeks: value
                .default_weeks
                .filter(|weeks| (1..=MAX_WEEKS).contains(weeks))
                .unwrap_or(DEFAULT_WEEKS),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_config_falls_back_per_key() {
        let raw: RawConfig = serde_json::from_str(r#"{"storage": "mongo"}"#).unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.storage(), StorageBackend::Mongo);
        assert_eq!(config.default_weeks(), DEFAULT_WEEKS);

        let raw: RawConfig = serde_json::from_str(r#"{"default_weeks": 0}"#).unwrap();
        let config = AppConfig::from(raw);
        assert_eq!(config.storage(), StorageBackend::Memory);
        assert_eq!(config.default_weeks(), DEFAULT_WEEKS);

        let raw: RawConfig = serde_json::from_str(r#"{"default_weeks": 500}"#).unwrap();
        assert_eq!(AppConfig::from(raw).default_weeks(), DEFAULT_WEEKS);

        let raw: RawConfig = serde_json::from_str(r#"{"default_weeks": 12}"#).unwrap();
        assert_eq!(AppConfig::from(raw).default_weeks(), 12);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = AppConfig::from_file(Path::new("does/not/exist.json"));
        assert_eq!(config.storage(), StorageBackend::Memory);
        assert_eq!(config.default_weeks(), DEFAULT_WEEKS);
    }

    #[test]
    fn storage_backend_parses_aliases() {
        assert_eq!("Mongo".parse::<StorageBackend>(), Ok(StorageBackend::Mongo));
        assert_eq!("mongodb".parse::<StorageBackend>(), Ok(StorageBackend::Mongo));
        assert_eq!(" memory ".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("couch".parse::<StorageBackend>().is_err());
    }
}
