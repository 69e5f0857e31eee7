//! UI preferences that survive across editing sessions
//!
//! Only these four fields are ever written durably by the store. The page
//! document and its history are never auto-persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown preview device: {0}")]
    UnknownDevice(String),
}

/// Device frame used by the live preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewDevice {
    /// 1920x1080
    #[default]
    Desktop,

    /// 768x1024
    Tablet,

    /// 375x667
    Mobile,
}

impl PreviewDevice {
    /// (width, height) in CSS pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PreviewDevice::Desktop => (1920, 1080),
            PreviewDevice::Tablet => (768, 1024),
            PreviewDevice::Mobile => (375, 667),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewDevice::Desktop => "desktop",
            PreviewDevice::Tablet => "tablet",
            PreviewDevice::Mobile => "mobile",
        }
    }
}

impl fmt::Display for PreviewDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewDevice {
    type Err = PreferencesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(PreviewDevice::Desktop),
            "tablet" => Ok(PreviewDevice::Tablet),
            "mobile" => Ok(PreviewDevice::Mobile),
            _ => Err(PreferencesError::UnknownDevice(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiPreferences {
    pub sidebar_open: bool,
    pub show_real_time_preview: bool,
    pub auto_save_enabled: bool,
    pub preview_device: PreviewDevice,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            show_real_time_preview: true,
            auto_save_enabled: false,
            preview_device: PreviewDevice::Desktop,
        }
    }
}

/// Durable storage for [`UiPreferences`]
pub trait PreferenceStorage: Send + Sync {
    /// Stored preferences, or `None` when nothing was saved yet
    fn load(&self) -> Result<Option<UiPreferences>, PreferencesError>;

    fn save(&self, preferences: &UiPreferences) -> Result<(), PreferencesError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<UiPreferences>, PreferencesError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, preferences: &UiPreferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(preferences)?)?;
        Ok(())
    }
}

/// In-memory storage for testing
#[derive(Debug, Default)]
pub struct MemoryStorage {
    stored: Mutex<Option<UiPreferences>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: UiPreferences) -> Self {
        Self {
            stored: Mutex::new(Some(preferences)),
        }
    }

    pub fn stored(&self) -> Option<UiPreferences> {
        *self.stored.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self) -> Result<Option<UiPreferences>, PreferencesError> {
        Ok(self.stored())
    }

    fn save(&self, preferences: &UiPreferences) -> Result<(), PreferencesError> {
        *self.stored.lock().unwrap_or_else(|e| e.into_inner()) = Some(*preferences);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_dimensions() {
        assert_eq!(PreviewDevice::Desktop.dimensions(), (1920, 1080));
        assert_eq!(PreviewDevice::Tablet.dimensions(), (768, 1024));
        assert_eq!(PreviewDevice::Mobile.dimensions(), (375, 667));
    }

    #[test]
    fn test_device_from_str() {
        assert_eq!("Mobile".parse::<PreviewDevice>().unwrap(), PreviewDevice::Mobile);
        assert!("watch".parse::<PreviewDevice>().is_err());
    }

    #[test]
    fn test_parse_partial_preferences() {
        let prefs: UiPreferences = serde_json::from_str(r#"{ "previewDevice": "tablet" }"#).unwrap();
        assert_eq!(prefs.preview_device, PreviewDevice::Tablet);
        assert!(prefs.sidebar_open);
        assert!(!prefs.auto_save_enabled);
    }

    #[test]
    fn test_json_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/prefs.json"));

        assert!(storage.load().unwrap().is_none());

        let prefs = UiPreferences {
            sidebar_open: false,
            preview_device: PreviewDevice::Mobile,
            ..UiPreferences::default()
        };
        storage.save(&prefs).unwrap();

        assert_eq!(storage.load().unwrap(), Some(prefs));
    }

    #[test]
    fn test_json_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = JsonFileStorage::new(path);
        assert!(matches!(storage.load(), Err(PreferencesError::Json(_))));
    }
}
