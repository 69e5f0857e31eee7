use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vinyl_editor::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_CONFIG_NAME: &str = "vinyl.config.json";

/// Vinyl configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `<slug>.json` page documents
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Where UI preferences are stored
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,

    /// Undo depth for editing sessions
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_preferences_file() -> String {
    ".vinyl/preferences.json".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn save(&self, cwd: &str) -> anyhow::Result<PathBuf> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
        std::fs::write(&config_path, serde_json::to_string_pretty(self)?)?;
        Ok(config_path)
    }

    /// Get absolute path to the pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    pub fn get_drafts_dir(&self, cwd: &str) -> PathBuf {
        self.get_pages_dir(cwd).join("drafts")
    }

    pub fn get_preferences_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.preferences_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            preferences_file: default_preferences_file(),
            history_limit: default_history_limit(),
        }
    }
}
