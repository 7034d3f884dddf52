use crate::error::LoadError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// How the CLI prints replay results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Display text only
    #[default]
    Text,
    /// One JSON object per output delta and per parser event
    Json,
}

/// Defaults for the CLI, loaded from `settings.json` in the config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Characters per chunk when streaming a plain text file
    pub chunk_size: usize,
    /// Message id used for plain text input
    pub message_id: String,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            message_id: "message-1".to_string(),
            format: OutputFormat::Text,
        }
    }
}

/// Directory holding `settings.json`.
///
/// `MESSAGE_PARSER_CONFIG_DIR` wins, then `$XDG_CONFIG_HOME/message-parser`,
/// then `~/.config/message-parser`.
pub fn config_dir() -> Result<PathBuf, LoadError> {
    if let Ok(custom_dir) = std::env::var("MESSAGE_PARSER_CONFIG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("message-parser"));
    }

    let home = dirs::home_dir().ok_or(LoadError::NoConfigDir)?;
    Ok(home.join(".config").join("message-parser"))
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from `path` or the default location, falling back to
    /// the defaults when they can't be read
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match config_dir() {
                Ok(dir) => dir.join(SETTINGS_FILE),
                Err(err) => {
                    tracing::warn!("Failed to locate settings: {err}");
                    return Self::default();
                }
            },
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                tracing::warn!("Failed to load settings from {}: {err}", path.display());
                Self::default()
            }
        }
    }
}
