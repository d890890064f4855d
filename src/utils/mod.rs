use crate::core::config::{ConfigManager, ConfigProvider};
use crate::core::engine::LedgerEngine;
use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

/// Turns a raw command-line value for an integer field into the value handed
/// to a registry.
///
/// Text that reads as an integer becomes an integer. Anything else is passed
/// through as text and left for the registry's validation to reject.
pub fn integer_field(raw: &str) -> Value {
    match raw.trim().parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    }
}

/// [`integer_field`] for optional update flags. An omitted flag stays `None`.
pub fn optional_integer_field(raw: Option<&str>) -> Option<Value> {
    raw.map(integer_field)
}

/// Installs the `env_logger` backend. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

pub fn initialize_ledger(config_manager: &ConfigManager) -> Result<()> {
    config_manager.initialize()?;
    LedgerEngine::new(config_manager)?;
    println!(
        "✓ Initialized hotel ledger at {}",
        config_manager.get_config_path()?.display()
    );
    Ok(())
}

// Helper function to create ConfigManager instance
pub fn get_config_manager(config_path: Option<PathBuf>) -> Result<ConfigManager> {
    match config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    }
}
