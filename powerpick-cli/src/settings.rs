use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub data_path: PathBuf,
    pub default_ticket_count: usize,
    pub max_ticket_count: usize,
    pub hot_cold_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/powerball.txt"),
            default_ticket_count: 5,
            max_ticket_count: 100,
            hot_cold_count: 10,
        }
    }
}

impl Settings {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read settings {:?}", path))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Invalid settings file {:?}", path))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Cannot write settings {:?}", path))?;
        Ok(())
    }

    /// Keeps a requested ticket count within `1..=max_ticket_count`.
    pub fn clamp_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_ticket_count)
            .clamp(1, self.max_ticket_count.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerpick.json");
        let settings = Settings {
            hot_cold_count: 3,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerpick.json");
        std::fs::write(&path, r#"{"max_ticket_count": 20}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.max_ticket_count, 20);
        assert_eq!(settings.default_ticket_count, 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerpick.json");
        std::fs::write(&path, r#"{"colour": "red"}"#).unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_clamp_count() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_count(None), 5);
        assert_eq!(settings.clamp_count(Some(0)), 1);
        assert_eq!(settings.clamp_count(Some(250)), 100);
        assert_eq!(settings.clamp_count(Some(42)), 42);
    }
}
