//! User configuration loaded from TOML.
//!
//! Looked up at `$XDG_CONFIG_HOME/memcalc/config.toml` unless a path is given.
//! Every key is optional.
//!
//! ```toml
//! log_level = "debug"
//!
//! [display]
//! format = "json"
//! echo_tokens = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::CalcError;

/// How the shell prints the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `M 12 + | 3`
    #[default]
    Plain,
    /// One JSON object per display.
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    /// Prefix each plain display with the token that produced it.
    pub echo_tokens: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memcalc").join("config.toml"))
    }

    /// Load the config at `path`, or at [`Config::default_path`] when `None`.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, CalcError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| CalcError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&contents)
            .map_err(|source| CalcError::ConfigParse { path: path.clone(), source })?;

        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
