//! core::config
//!
//! Configuration file loading and run settings.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Configuration file
//! 3. Environment (GitHub Actions `INPUT_*` variables, `GITHUB_REPOSITORY`)
//! 4. CLI flags
//!
//! Steps 3 and 4 are collected by the CLI layer into [`Inputs`]; this module
//! merges them with the file into an immutable [`Settings`].
//!
//! # Config File Locations
//!
//! Searched in order, first hit wins:
//! 1. The path given with `--config` (must exist)
//! 2. `$CHANGELOG_FORGE_CONFIG` if set
//! 3. `./.changelog-forge.toml` in the working directory
//! 4. `$XDG_CONFIG_HOME/changelog-forge/config.toml` (platform config dir)
//!
//! # Example
//!
//! ```no_run
//! use changelog_forge::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("/path/to/repo"), None).unwrap();
//! if let Some(path) = config.loaded_from() {
//!     println!("Using config: {}", path.display());
//! }
//! ```

pub mod schema;
mod settings;

pub use schema::FileConfig;
pub use settings::{Inputs, Settings, Token, DEFAULT_API_BASE, DEFAULT_OUTPUT, DEFAULT_WEB_HOST};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CHANGELOG_FORGE_CONFIG";

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".changelog-forge.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Configuration loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file was found)
    pub file: FileConfig,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, searching the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed, or if `explicit` names a file that does not exist.
    /// A missing config file in the implicit locations is not an error.
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(p) => Some(cwd.join(p)),
            None => Self::find(cwd),
        };

        match path {
            Some(path) => {
                let file = Self::read_config(&path)?;
                file.validate()?;
                Ok(Config {
                    file,
                    path: Some(path),
                })
            }
            None => Ok(Config::default()),
        }
    }

    /// Find the first existing config file in the implicit locations.
    fn find(cwd: &Path) -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = cwd.join(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("changelog-forge/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
