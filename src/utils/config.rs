use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::models::Settings;

const ENV_DB_PATH: &str = "REMINDERS_DB_PATH";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

pub fn db_path_from_env() -> Option<PathBuf> {
    std::env::var(ENV_DB_PATH)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn apply_env_defaults(settings: &mut Settings) {
    if let Some(db_path) = db_path_from_env() {
        settings.storage.db_path = db_path;
    }
}

/// Reads `settings.json` if present, falling back to defaults, then applies
/// environment overrides.
pub fn load_settings(config_path: &Path) -> Result<Settings> {
    load_dotenv();

    let mut settings = if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", config_path.display()))?
    } else {
        log::debug!("No settings at {}, using defaults", config_path.display());
        Settings::default()
    };
    apply_env_defaults(&mut settings);

    Ok(settings)
}

pub fn save_settings(config_path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(config_path, content)
        .with_context(|| format!("writing {}", config_path.display()))?;
    Ok(())
}
