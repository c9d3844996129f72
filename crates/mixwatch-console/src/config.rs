//! Console configuration: a toml file with per-field defaults, found via
//! `--config`, the platform config dir, or built-in defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub endpoint: EndpointConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Bulletin board base URL.
    pub base_url: String,
    /// Path of the status snapshot document.
    pub data_path: String,
    /// Path of the banner fragment loaded once at startup.
    pub header_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8200".to_string(),
            data_path: "/data".to_string(),
            header_path: "/header.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Milliseconds between refresh cycles.
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl ConsoleConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist and parse; the conventional path
    /// (`<config_dir>/mixwatch/config.toml`) is optional and falls back
    /// to defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, anyhow::Error> {
        if let Some(path) = explicit {
            return Self::read_file(path);
        }
        if let Some(dir) = dirs::config_dir() {
            let path = dir.join("mixwatch").join("config.toml");
            if path.exists() {
                return Self::read_file(&path);
            }
        }
        Ok(Self::default())
    }

    fn read_file(path: &Path) -> Result<Self, anyhow::Error> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}
