use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::builders::validator::{ConfigValidator, StandardValidator};
use crate::core::records::EntityKind;

/// Default name of the configuration file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hotel-ledger.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One pretty-printed JSON file per collection inside `data_dir`.
    File,
    /// Collections live only as long as the process.
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageSettings {
    /// Relative paths are resolved against the directory holding the config file.
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub hotels: String,
    pub customers: String,
    pub reservations: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data_storage"),
            backend: StorageBackend::File,
            hotels: "hotels.json".to_string(),
            customers: "customers.json".to_string(),
            reservations: "reservations.json".to_string(),
        }
    }
}

impl StorageSettings {
    pub fn collection_name(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Hotel => &self.hotels,
            EntityKind::Customer => &self.customers,
            EntityKind::Reservation => &self.reservations,
        }
    }

    pub fn collection_names(&self) -> [(EntityKind, &str); 3] {
        EntityKind::ALL.map(move |kind| (kind, self.collection_name(kind)))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GlobalSettings {
    pub verbose: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LedgerConfig {
    pub version: String,
    pub storage: StorageSettings,
    pub settings: GlobalSettings,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            storage: StorageSettings::default(),
            settings: GlobalSettings::default(),
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    root: PathBuf,
}

impl ConfigManager {
    /// Uses `hotel-ledger.toml` in the current working directory.
    pub fn new() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read current directory")?;
        Self::new_at(root)
    }

    /// Uses `hotel-ledger.toml` inside `root`.
    pub fn new_at(root: PathBuf) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE_NAME);
        Ok(Self { config_path, root })
    }

    /// Uses an explicit configuration file; its directory becomes the root.
    pub fn with_path(config_path: PathBuf) -> Result<Self> {
        let root = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().context("Failed to read current directory")?,
        };
        Ok(Self { config_path, root })
    }

    /// Writes the default configuration unless a file already exists.
    pub fn initialize(&self) -> Result<()> {
        if self.config_path.exists() {
            return Ok(());
        }

        let default_config = LedgerConfig::default();
        self.save_config(&default_config)?;
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        let config = self.load_config()?;
        let validator = StandardValidator::new();
        let issues = validator.validate_config(&config)?;

        if issues.is_empty() {
            println!("✓ Configuration is valid.");
            Ok(())
        } else {
            println!("⚠️  Found issues in configuration:");
            for issue in issues {
                println!("  - {issue}");
            }
            anyhow::bail!("Configuration validation failed.");
        }
    }

    /// The data directory of `config`, resolved against the config root.
    pub fn resolve_data_dir(&self, config: &LedgerConfig) -> PathBuf {
        if config.storage.data_dir.is_absolute() {
            config.storage.data_dir.clone()
        } else {
            self.root.join(&config.storage.data_dir)
        }
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<LedgerConfig>;
    fn save_config(&self, config: &LedgerConfig) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<LedgerConfig> {
        if !self.config_path.exists() {
            return Ok(LedgerConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn save_config(&self, config: &LedgerConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}
