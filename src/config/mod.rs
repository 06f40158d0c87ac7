pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{ApiConfig, AppConfig};

/// Overrides `api.base_url` when set.
pub const API_URL_ENV: &str = "TODO_API_URL";

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todo-tui")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let mut config = load_config_from(&config_path())?;
    apply_env_overrides(&mut config, std::env::var(API_URL_ENV).ok());
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

pub fn apply_env_overrides(config: &mut AppConfig, api_url: Option<String>) {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url;
    }
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}
