// src/core/config.rs
use crate::core::constants::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_DEBOUNCE_MS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_HISTORY,
    DEFAULT_REDO_CHORDS, DEFAULT_UNDO_CHORDS, MAX_DEBOUNCE_MS,
};
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// TOML Configuration Structure
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfig,
    #[serde(default)]
    history: HistoryConfigToml,
    #[serde(default)]
    shortcuts: ShortcutConfigToml,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralConfig {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryConfigToml {
    #[serde(default = "default_max_entries")]
    max_entries: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ShortcutConfigToml {
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,
    #[serde(default = "default_undo")]
    undo: Vec<String>,
    #[serde(default = "default_redo")]
    redo: Vec<String>,
}

// Default Functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.into()
}
fn default_max_entries() -> usize {
    DEFAULT_MAX_HISTORY
}
fn default_enabled() -> bool {
    true
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_undo() -> Vec<String> {
    DEFAULT_UNDO_CHORDS.iter().map(|s| s.to_string()).collect()
}
fn default_redo() -> Vec<String> {
    DEFAULT_REDO_CHORDS.iter().map(|s| s.to_string()).collect()
}

crate::impl_default!(GeneralConfig, GeneralConfig {
    log_level: default_log_level(),
});

crate::impl_default!(HistoryConfigToml, HistoryConfigToml {
    max_entries: default_max_entries(),
});

crate::impl_default!(ShortcutConfigToml, ShortcutConfigToml {
    enabled: default_enabled(),
    debounce_ms: default_debounce_ms(),
    undo: default_undo(),
    redo: default_redo(),
});

// Main Configuration Structures
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<PathBuf>,
    pub log_level: String,
    pub history: HistoryConfig,
    pub shortcuts: ShortcutConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Maximum recorded entries; `None` keeps everything.
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutConfig {
    pub enabled: bool,
    pub debounce: Duration,
    pub undo: Vec<String>,
    pub redo: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_struct(ConfigFile::default(), None)
    }
}

impl Config {
    /// Loads from `$UNDO_SYNC_CONFIG`, then `./undo-sync.toml`, falling back to defaults.
    pub async fn load() -> Result<Self> {
        for path in Self::candidate_paths() {
            if path.exists() {
                let config = Self::from_file(&path).await?;
                log::info!("Config loaded from {}", path.display());
                return Ok(config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(AppError::Io)?;
        let file: ConfigFile = toml::from_str(&content)?;
        Ok(Self::from_file_struct(
            file,
            Some(path.as_ref().to_path_buf()),
        ))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(Self::from_file_struct(file, None))
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn from_file_struct(file: ConfigFile, config_path: Option<PathBuf>) -> Self {
        let debounce_ms = Self::clamp(
            file.shortcuts.debounce_ms,
            0,
            MAX_DEBOUNCE_MS,
            DEFAULT_DEBOUNCE_MS,
        );

        Self {
            config_path,
            log_level: file.general.log_level,
            history: HistoryConfig {
                max_entries: match file.history.max_entries {
                    0 => None,
                    n => Some(n),
                },
            },
            shortcuts: ShortcutConfig {
                enabled: file.shortcuts.enabled,
                debounce: Duration::from_millis(debounce_ms),
                undo: file.shortcuts.undo,
                redo: file.shortcuts.redo,
            },
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        paths
    }

    fn clamp(value: u64, min: u64, max: u64, default: u64) -> u64 {
        if value < min || value > max {
            log::warn!(
                "Value {} out of range [{}, {}], using default {}",
                value,
                min,
                max,
                default
            );
            default
        } else {
            value
        }
    }
}
