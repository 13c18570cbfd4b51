//! Configuration management for TK templates.
//!
//! Parses `tk.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [template]
//! strict_tags = true
//!
//! [tags]
//! enabled = ["tk"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tk.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template parsing configuration.
    pub template: TemplateConfig,
    /// Bundled tag selection.
    pub tags: TagsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Template parsing configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Fail on tags with no registered handler instead of leaving them in the output.
    pub strict_tags: bool,
}

/// Bundled tag selection.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Names of the bundled tags to register.
    ///
    /// `None` enables every bundled tag. Names are checked against the bundled
    /// set when the tags are registered.
    pub enabled: Option<Vec<String>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file or discover it.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tk.toml` in the current directory and parents.
    /// Falls back to defaults if no file is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let cwd = std::env::current_dir().unwrap_or_default();
        Self::load_discovered(&cwd)
    }

    /// Load the nearest config file at or above `start`, or defaults if none exists.
    fn load_discovered(start: &Path) -> Result<Self, ConfigError> {
        match Self::discover_from(start) {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No tk.toml found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            strict_tags = config.template.strict_tags,
            tags = ?config.tags.enabled,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically when loading from a file or string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_tags()
    }

    /// Validate the enabled tag list.
    fn validate_tags(&self) -> Result<(), ConfigError> {
        let Some(enabled) = &self.tags.enabled else {
            return Ok(());
        };
        for (idx, name) in enabled.iter().enumerate() {
            if enabled[..idx].contains(name) {
                return Err(ConfigError::Validation(format!(
                    "tags.enabled: duplicate tag name {name:?}"
                )));
            }
        }
        Ok(())
    }
}
