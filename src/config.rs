//! Configuration file handling for glyphpack.
//!
//! Loads configuration from `~/.config/glyphpack/config.toml` or a custom
//! path. The file supplies defaults for the target grid size, the output
//! format, and the terminal preview box; command-line flags override it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file structure for glyphpack.
/// Loaded from ~/.config/glyphpack/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_dim")]
    pub width: usize,
    #[serde(default = "default_grid_dim")]
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: default_grid_dim(),
            height: default_grid_dim(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format name (c, hex, binary, ascii, all).
    pub format: Option<String>,
    /// Default C array identifier.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_width")]
    pub max_width: u16,
    #[serde(default = "default_preview_height")]
    pub max_height: u16,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            max_width: default_preview_width(),
            max_height: default_preview_height(),
            enabled: true,
        }
    }
}

fn default_grid_dim() -> usize {
    16
}

fn default_preview_width() -> u16 {
    crate::preview::DEFAULT_MAX_WIDTH
}

fn default_preview_height() -> u16 {
    crate::preview::DEFAULT_MAX_HEIGHT
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphpack").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphpack/config.toml")
        })
}
