//! Runtime configuration, read from TOML.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STOREFRONT_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const CONFIG_FILE: &str = "storefront.toml";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[storage]
dir = "storefront-data"
key_prefix = "storefront"

[exchange]
export_dir = "."

[indicators]
search_debounce_ms = 450
cart_pulse_ms = 600

[stores]
channel_capacity = 32
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub storage: StorageConfig,
    pub exchange: ExchangeConfig,
    pub indicators: IndicatorConfig,
    pub stores: StoresConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the `<key>.json` snapshot files.
    pub dir: PathBuf,
    pub key_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub search_debounce_ms: u64,
    pub cart_pulse_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoresConfig {
    pub channel_capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("storefront-data"),
            key_prefix: "storefront".to_string(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 450,
            cart_pulse_ms: 600,
        }
    }
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
        }
    }
}

impl IndicatorConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn cart_pulse(&self) -> Duration {
        Duration::from_millis(self.cart_pulse_ms)
    }
}

impl StorefrontConfig {
    /// Load configuration.
    ///
    /// Search order:
    /// 1. The file named by `STOREFRONT_CONFIG`
    /// 2. `storefront.toml` in the working directory
    /// 3. The embedded default
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        tracing::info!("Using default embedded configuration");
        Self::from_toml(DEFAULT_CONFIG)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with all snapshot files under `dir`; handy for tests.
    pub fn with_storage_dir(dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.storage.dir = dir.into();
        config
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stores.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "stores.channel_capacity must be at least 1".to_string(),
            ));
        }
        let prefix = &self.storage.key_prefix;
        if prefix.is_empty()
            || !prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err(ConfigError::Invalid(format!(
                "storage.key_prefix '{prefix}' may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(())
    }
}
