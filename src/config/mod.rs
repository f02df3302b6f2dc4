//! Configuration module for the HAI adapter
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are loaded once at startup and shared read-only afterwards.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Load settings from the first file found, falling back to defaults.
///
/// A `.env` file in the working directory is applied to the process
/// environment before anything else is read.
pub fn load() -> Result<Settings> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from: {}", path.display());
    }

    let mut settings = match settings_path() {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn settings_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HAI_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("hai-adapter/settings.yml"));
    }

    candidates.into_iter().find(|p| p.exists())
}
