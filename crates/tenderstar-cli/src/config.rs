//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tenderstar_prozorro::config::{DEFAULT_CONTRACTS_URL, DEFAULT_TENDERS_URL};

/// Global configuration for tenderstar
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub api: ApiConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub contracts_url: String,
    pub tenders_url: String,
    pub max_pages: Option<usize>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            contracts_url: DEFAULT_CONTRACTS_URL.to_string(),
            tenders_url: DEFAULT_TENDERS_URL.to_string(),
            max_pages: None,
        }
    }
}

/// HTTP settings, timeouts in seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout: u64,
    pub request_timeout: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let defaults = tenderstar_core::HttpConfig::default();
        Self {
            connect_timeout: defaults.connect_timeout.as_secs(),
            request_timeout: defaults.request_timeout.as_secs(),
            user_agent: defaults.user_agent,
        }
    }
}

impl HttpConfig {
    /// Core client settings, with optional CLI overrides (seconds)
    pub fn to_core(
        &self,
        connect_timeout: Option<u64>,
        request_timeout: Option<u64>,
    ) -> tenderstar_core::HttpConfig {
        tenderstar_core::HttpConfig {
            connect_timeout: Duration::from_secs(connect_timeout.unwrap_or(self.connect_timeout)),
            request_timeout: Duration::from_secs(request_timeout.unwrap_or(self.request_timeout)),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./tenderstar.toml (current directory)
    /// 2. ~/.config/tenderstar/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("tenderstar.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "tenderstar") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
