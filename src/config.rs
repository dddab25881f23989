//! Configuration file handling for ansi-art.
//!
//! Loads configuration from `<config dir>/ansi-art/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::codec::EncodeOptions;
use crate::render::{HtmlRenderer, TextRenderer};

/// Configuration file structure.
/// Loaded from the user config directory (or a custom path via --config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub html: HtmlConfig,
    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Decode width when the file carries no SAUCE width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(default = "default_true")]
    pub true_color: bool,
    #[serde(default = "default_true")]
    pub black_background_as_default: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: None,
            true_color: true,
            black_background_as_default: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlConfig {
    #[serde(default = "default_css_class")]
    pub css_class: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            css_class: default_css_class(),
            font_family: default_font_family(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextConfig {
    #[serde(default)]
    pub preserve_whitespace: bool,
}

fn default_true() -> bool {
    true
}

fn default_css_class() -> String {
    "ansi-art".to_string()
}

fn default_font_family() -> String {
    "monospace".to_string()
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
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }

    /// Encoder settings derived from `[render]`.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            black_background_as_default: self.render.black_background_as_default,
            true_color: self.render.true_color,
            ..EncodeOptions::default()
        }
    }

    pub fn html_renderer(&self) -> HtmlRenderer {
        HtmlRenderer::new(&self.html.css_class, &self.html.font_family)
    }

    pub fn text_renderer(&self) -> TextRenderer {
        TextRenderer::new(self.text.preserve_whitespace)
    }
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ansi-art").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ansi-art/config.toml")
        })
}
