//! Configuration system for yamlnub.
//!
//! Settings live in `~/.config/yamlnub/config.toml`. Every field has a
//! default, so a missing file or a partial one is fine.
//!
//! # Example
//!
//! ```
//! use yamlnub::config::{Config, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//! assert!(!config.create_backup);
//!
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! assert_eq!(custom.log_filter, "warn");
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How documents are written out when the target does not decide it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Configuration for the yamlnub command line.
///
/// * `output_format` - Format for printed and saved documents (default: yaml)
/// * `create_backup` - Create .bak files before overwriting (default: false)
/// * `log_filter` - Tracing filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Format for printed and saved documents
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Create .bak files before overwriting
    #[serde(default)]
    pub create_backup: bool,

    /// Default tracing filter
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            create_backup: false,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlnub/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlnub");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable config, using defaults");
                return Self::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path` as pretty TOML.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert!(!config.create_backup);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let config: Config = toml::from_str("create_backup = true\n").unwrap();
        assert!(config.create_backup);
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_output_format_is_lowercase() {
        let config: Config = toml::from_str("output_format = \"json\"\n").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            output_format: OutputFormat::Json,
            create_backup: true,
            log_filter: "yamlnub=debug".to_string(),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_missing_or_invalid_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_from(&path), Config::default());

        std::fs::write(&path, "output_format = 3\n").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
