use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TendieError};

pub const CATEGORIES_FILE: &str = "categories.json";
pub const PAYERS_FILE: &str = "payers.json";
pub const SUBMISSIONS_DIR: &str = "submissions";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default)]
    pub user_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            user_name: String::new(),
        }
    }
}

impl Settings {
    pub fn greeting(&self) -> String {
        if self.user_name.is_empty() {
            "Tendie Tracker".to_string()
        } else {
            format!("Tendie Tracker: {}", self.user_name)
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tendies")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tendies")
}

fn parse_settings(content: &str) -> Settings {
    serde_json::from_str(content).unwrap_or_default()
}

pub fn load_settings() -> Settings {
    match std::fs::read_to_string(settings_path()) {
        Ok(content) => parse_settings(&content),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(config_dir())?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TendieError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn categories_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CATEGORIES_FILE)
}

pub fn payers_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PAYERS_FILE)
}

pub fn submissions_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(SUBMISSIONS_DIR)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::path::absolute(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
