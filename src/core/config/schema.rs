//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! output = "docs/CHANGELOG.md"
//!
//! # GitHub Enterprise
//! api_base = "https://github.example.com/api/v3"
//! web_host = "github.example.com"
//! ```
//!
//! The API token is not a recognized key. It must come from the command
//! line or the environment so it never ends up committed to a repository.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::RepoSlug;

/// Settings read from a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repository owner (user or organization)
    pub owner: Option<String>,

    /// Repository name, or `owner/name`
    pub repo: Option<String>,

    /// Changelog path, relative to the working directory
    pub output: Option<String>,

    /// REST API base URL
    pub api_base: Option<String>,

    /// Web host used in compare links
    pub web_host: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(repo) = &self.repo {
            if repo.contains('/') {
                RepoSlug::parse(repo).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
            }
        }

        if let Some(owner) = &self.owner {
            if owner.is_empty() || owner.contains('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid owner '{}'",
                    owner
                )));
            }
        }

        if let Some(output) = &self.output {
            if output.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "output path must not be empty".to_string(),
                ));
            }
        }

        if let Some(api_base) = &self.api_base {
            validate_api_base(api_base)?;
        }

        if let Some(host) = &self.web_host {
            validate_web_host(host)?;
        }

        Ok(())
    }
}

/// Check that an API base is an absolute http(s) URL.
pub fn validate_api_base(api_base: &str) -> Result<(), ConfigError> {
    if api_base.starts_with("https://") || api_base.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid api_base '{}', must start with https:// or http://",
            api_base
        )))
    }
}

/// Check that a web host is a bare host name (no scheme, no path).
pub fn validate_web_host(host: &str) -> Result<(), ConfigError> {
    if host.is_empty() || host.contains("://") || host.contains('/') {
        Err(ConfigError::InvalidValue(format!(
            "invalid web_host '{}', expected a bare host like 'github.com'",
            host
        )))
    } else {
        Ok(())
    }
}
