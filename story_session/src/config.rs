//! Configuration for the `chand` front end.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file, then
//! `CHAND_*` environment variables. Command-line flags are applied on top by
//! the binary.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::render::Labels;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chand.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Story file to load. `None` plays the bundled story.
    pub story: Option<PathBuf>,

    /// ANSI colours in terminal output.
    pub color: bool,

    /// Show the visited path under each scene.
    pub show_trail: bool,

    pub logging: LoggingConfig,

    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            story: None,
            color: true,
            show_trail: true,
            logging: LoggingConfig::default(),
            labels: Labels::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `story_session=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, SessionError> {
        match value.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(SessionError::Config {
                message: format!("unknown log format '{other}', expected 'pretty' or 'json'"),
            }),
        }
    }
}

impl Config {
    /// Parse a TOML config document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self, SessionError> {
        toml::from_str(source).map_err(|source| SessionError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `chand.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, SessionError> {
        let mut config = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?, path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_toml_str(&std::fs::read_to_string(default)?, default)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `CHAND_*` overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(story) = lookup("CHAND_STORY") {
            self.story = Some(PathBuf::from(story));
        }
        if let Some(level) = lookup("CHAND_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CHAND_LOG_FORMAT") {
            self.logging.format = LogFormat::parse(&format)?;
        }
        // NO_COLOR convention: any value disables colour
        if lookup("NO_COLOR").is_some() {
            self.color = false;
        }
        Ok(())
    }
}
