//! Editor configuration loaded from `pagecraft.config.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::EditorError;

pub const CONFIG_FILE: &str = "pagecraft.config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Oldest notifications are dropped past this many
    pub max_notifications: usize,

    /// Ask before deleting a section
    pub confirm_delete: bool,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_notifications: 20,
            confirm_delete: true,
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load config from `dir`, falling back to defaults when no file exists
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Write config into `dir`
    pub fn save(&self, dir: &Path) -> Result<(), EditorError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{ "confirmDelete": false }"#).unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert!(!config.confirm_delete);
        assert_eq!(config.max_notifications, 20);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let config = EditorConfig {
            max_notifications: 5,
            ..Default::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ nope").unwrap();
        assert!(matches!(EditorConfig::load(dir.path()), Err(EditorError::Config(_))));
    }
}
