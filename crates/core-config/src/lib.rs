//! Configuration loading and parsing.
//!
//! Parses `vintage.toml` (or an override path provided by the binary) into
//! engine and kill-ring settings. Missing files and parse errors fall back to
//! defaults; unknown fields are ignored so the format can grow without
//! warnings. Out-of-range values are clamped by `Config::sanitize`, which
//! logs every adjustment under the `config` target.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "vintage.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Decoded repeat counts saturate at this value.
    #[serde(default = "EngineConfig::default_max_repeat")]
    pub max_repeat: u32,
    /// Status slot the mode label is written to.
    #[serde(default = "EngineConfig::default_status_key")]
    pub status_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_repeat: Self::default_max_repeat(),
            status_key: Self::default_status_key(),
        }
    }
}

impl EngineConfig {
    const fn default_max_repeat() -> u32 {
        999_999
    }
    fn default_status_key() -> String {
        "mode".to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct KillRingConfig {
    #[serde(default = "KillRingConfig::default_capacity")]
    pub capacity: usize,
}

impl Default for KillRingConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}

impl KillRingConfig {
    const fn default_capacity() -> usize {
        16
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub kill_ring: KillRingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // file contents as read
    pub file: ConfigFile,    // parsed, or defaults
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vintage").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
            };
            cfg.sanitize();
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp values the engine cannot honor. Returns true when anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.file.engine.max_repeat == 0 {
            info!(target: "config", key = "engine.max_repeat", raw = 0, clamped = 1, "config_value_clamped");
            self.file.engine.max_repeat = 1;
            changed = true;
        }
        if self.file.kill_ring.capacity == 0 {
            info!(target: "config", key = "kill_ring.capacity", raw = 0, clamped = 1, "config_value_clamped");
            self.file.kill_ring.capacity = 1;
            changed = true;
        }
        if self.file.engine.status_key.trim().is_empty() {
            let fallback = EngineConfig::default_status_key();
            info!(target: "config", key = "engine.status_key", clamped = %fallback, "config_value_clamped");
            self.file.engine.status_key = fallback;
            changed = true;
        }
        changed
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.file.engine
    }

    pub fn kill_ring(&self) -> &KillRingConfig {
        &self.file.kill_ring
    }
}
