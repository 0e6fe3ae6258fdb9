use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};
use which::which;

use crate::{CaptureError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Directory where the collections are stored; `None` when no platform
    /// data directory could be resolved
    pub data_dir: Option<PathBuf>,

    /// Store key for the idea collection
    pub ideas_key: String,

    /// Store key for the category collection
    pub categories_key: String,

    /// Default editor command (for composing ideas)
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: dirs::data_dir().map(|dir| dir.join("idea-capture")),
            ideas_key: "idea-capture-ideas".to_string(),
            categories_key: "idea-capture-categories".to_string(),
            editor_command: None,
        }
    }
}

impl Config {
    /// Loads configuration from the given file, or from the default
    /// location when no path is supplied. A missing default file means
    /// default settings; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match dirs::config_dir() {
                Some(dir) => {
                    let default_path = dir.join("idea-capture").join("config.json");
                    if !default_path.exists() {
                        debug!(
                            "No config file at {}, using defaults",
                            default_path.display()
                        );
                        return Ok(Config::default());
                    }
                    default_path
                }
                None => return Ok(Config::default()),
            },
        };

        let text = fs::read_to_string(&path).map_err(|e| CaptureError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&text).map_err(|e| CaptureError::ConfigError {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_expected_store_keys() {
        let config = Config::default();
        assert_eq!(config.ideas_key, "idea-capture-ideas");
        assert_eq!(config.categories_key, "idea-capture-categories");
        assert!(config.editor_command.is_none());
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "ideas_key": "scratch-ideas" }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ideas_key, "scratch-ideas");
        assert_eq!(config.categories_key, "idea-capture-categories");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, CaptureError::ConfigError { .. }));
    }
}
