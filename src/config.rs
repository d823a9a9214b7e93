use crate::services::storage::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entry list file; defaults to `~/.pawprints/pawprintsDiary.json`
    pub storage_path: Option<PathBuf>,
    /// How long the cover animation runs before the book is open
    pub open_delay_ms: u64,
    /// How long a page turn takes
    pub page_turn_ms: u64,
    /// How often to check whether the calendar day changed
    pub day_check_secs: u64,
    /// Log file; defaults to `~/.pawprints/pawprints.log`
    pub log_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            open_delay_ms: 1000,
            page_turn_ms: 300,
            day_check_secs: 60,
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".pawprints"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file, falling back to defaults if it is missing or broken
    pub fn load() -> Config {
        let Some(config_path) = Self::config_path() else {
            return Config::default();
        };
        if !config_path.exists() {
            return Config::default();
        }

        let parsed = fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| Ok(serde_json::from_str(&contents)?));

        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "Ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Where the entry list lives
    pub fn effective_storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            Self::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!("{}.json", STORAGE_KEY))
        })
    }

    /// Where log records are written
    pub fn effective_log_path(&self) -> PathBuf {
        self.log_path.clone().unwrap_or_else(|| {
            Self::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pawprints.log")
        })
    }
}
