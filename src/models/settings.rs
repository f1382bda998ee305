use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            storage: StorageSettings::default(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub db_path: PathBuf,
    pub journal_mode: String,
    pub synchronous: String,
    pub create_missing_dirs: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/db.sqlite"),
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
            create_missing_dirs: true,
        }
    }
}
