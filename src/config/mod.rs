//! Configuration management for bindery.
//!
//! Settings are read from `~/.config/bindery/config.toml` at startup. If the
//! file doesn't exist, a default configuration with comments is created.
//! The feed list itself is a separate newline-delimited file, parsed by
//! [`sources`].

pub mod sources;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration struct.
///
/// Missing fields in the config file fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub book: BookConfig,
    pub fetch: FetchConfig,
    pub cover: CoverConfig,
    pub output: OutputConfig,
}

/// Metadata attached to the generated book.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Language tag written into the book metadata.
    pub language: String,
    /// Creator metadata.
    pub author: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            language: "zh-CN".into(),
            author: "bindery".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Keep at most this many of the most recent entries per feed.
    pub max_entries: usize,
    pub feed_timeout_secs: u64,
    pub image_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_entries: 10,
            feed_timeout_secs: 30,
            image_timeout_secs: 10,
        }
    }
}

/// Cover image geometry. Defaults target a 6" e-reader screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    pub width: u32,
    pub height: u32,
    pub block_size: u32,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            width: 1264,
            height: 1680,
            block_size: 140,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the EPUB is written into; created if absent.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("books"),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or the default path.
    ///
    /// If no explicit path is given and the default config file doesn't
    /// exist, a commented default file is created and defaults are returned.
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            if path.is_some() {
                return Err(ConfigError::Io {
                    path: config_path,
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "config file not found",
                    ),
                });
            }
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/bindery/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("bindery").join("config.toml"))
    }

    /// Get the default feed list path: `~/.config/bindery/feeds.txt`
    pub fn default_feeds_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("bindery").join("feeds.txt"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# bindery configuration
#
# The feed list lives next to this file in feeds.txt, one URL per line.
# Blank lines and lines starting with '#' are ignored there.

[book]
# Language tag for the generated book.
language = "zh-CN"
# Creator metadata.
author = "bindery"

[fetch]
# Keep at most this many of the most recent entries per feed.
max_entries = 10
# Timeout budget for one feed download, in seconds.
feed_timeout_secs = 30
# Timeout budget for one image download, in seconds.
image_timeout_secs = 10

[cover]
# Cover image geometry in pixels. Defaults fit a 6" e-reader screen.
width = 1264
height = 1680
block_size = 140

[output]
# Directory the EPUB is written into; created if absent.
dir = "books"
"##
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetch.max_entries, 10);
        assert_eq!(config.fetch.feed_timeout_secs, 30);
        assert_eq!(config.fetch.image_timeout_secs, 10);
        assert_eq!(config.book.language, "zh-CN");
        assert_eq!(config.cover.width, 1264);
        assert_eq!(config.cover.height, 1680);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[fetch]\nmax_entries = 3\n").unwrap();
        assert_eq!(config.fetch.max_entries, 3);
        assert_eq!(config.fetch.feed_timeout_secs, 30);
        assert_eq!(config.book.language, "zh-CN");
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(&Config::default_config_content()).unwrap();
        assert_eq!(config.fetch.max_entries, 10);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[book]\nlanguage = \"en\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.book.language, "en");
    }
}
