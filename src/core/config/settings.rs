//! core::config::settings
//!
//! Resolved, immutable settings for a single run.

use std::path::{Path, PathBuf};

use super::schema::{validate_api_base, validate_web_host};
use super::FileConfig;
use crate::core::errors::ChangelogError;
use crate::core::types::RepoSlug;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default web host used in compare links.
pub const DEFAULT_WEB_HOST: &str = "github.com";

/// Default changelog file name.
pub const DEFAULT_OUTPUT: &str = "CHANGELOG.md";

/// An API token.
///
/// `Debug` never prints the value; call [`Token::expose`] where the raw
/// value is genuinely needed (the Authorization header, the runner mask).
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

/// Raw inputs collected from CLI flags and the environment.
///
/// Empty strings count as absent: GitHub Actions sets `INPUT_*` to `""`
/// for inputs the workflow did not provide.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub token: Option<Token>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub output: Option<PathBuf>,
    pub api_base: Option<String>,
    pub web_host: Option<String>,
    /// `owner/name` from `$GITHUB_REPOSITORY`
    pub github_repository: Option<String>,
}

/// Settings for one changelog run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API token
    pub token: Token,
    /// Target repository
    pub repo: RepoSlug,
    /// Absolute or cwd-relative path of the changelog document
    pub output: PathBuf,
    /// REST API base URL
    pub api_base: String,
    /// Web host for compare links
    pub web_host: String,
}

impl Settings {
    /// Merge inputs over the config file.
    ///
    /// Repository resolution, first match wins:
    /// 1. `repo` input or config key. `owner/name` form carries its own
    ///    owner; a bare name needs `owner` (input or config key).
    /// 2. `$GITHUB_REPOSITORY`
    /// 3. `detect`, typically the `origin` remote of the working tree
    ///
    /// An `owner` input overrides the owner half of any slug. The `owner`
    /// config key only applies to a bare name or to a slug that also comes
    /// from the config file.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::Configuration`] if the token or the
    /// repository cannot be determined, or a value is malformed.
    pub fn resolve(
        cwd: &Path,
        inputs: Inputs,
        file: &FileConfig,
        detect: impl FnOnce() -> Option<RepoSlug>,
    ) -> Result<Self, ChangelogError> {
        let token = inputs
            .token
            .filter(|t| !t.expose().trim().is_empty())
            .ok_or_else(|| ChangelogError::Configuration("missing required input: token".into()))?;

        let input_owner = non_empty(inputs.owner);
        let file_owner = non_empty(file.owner.clone());
        let (repo_input, from_file) = match non_empty(inputs.repo) {
            Some(repo) => (Some(repo), false),
            None => (non_empty(file.repo.clone()), true),
        };

        let fallback = || {
            non_empty(inputs.github_repository.clone())
                .and_then(|s| RepoSlug::parse(&s).ok())
                .or_else(detect)
        };

        let repo = match repo_input {
            Some(repo) if repo.contains('/') => {
                let slug = RepoSlug::parse(&repo).map_err(config_err)?;
                let owner = if from_file {
                    input_owner.or(file_owner)
                } else {
                    input_owner
                };
                match owner {
                    Some(owner) => RepoSlug::new(owner, slug.name()).map_err(config_err)?,
                    None => slug,
                }
            }
            Some(repo) => {
                let owner = input_owner
                    .or(file_owner)
                    .or_else(|| fallback().map(|s| s.owner().to_string()))
                    .ok_or_else(|| {
                        ChangelogError::Configuration(format!(
                            "missing repository owner for '{}': pass --owner or use 'owner/{}'",
                            repo, repo
                        ))
                    })?;
                RepoSlug::new(owner, repo).map_err(config_err)?
            }
            None => {
                let slug = fallback().ok_or_else(|| {
                    ChangelogError::Configuration("missing required input: repo".into())
                })?;
                match input_owner {
                    Some(owner) => RepoSlug::new(owner, slug.name()).map_err(config_err)?,
                    None => slug,
                }
            }
        };

        let output = inputs
            .output
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| non_empty(file.output.clone()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let api_base = non_empty(inputs.api_base)
            .or_else(|| non_empty(file.api_base.clone()))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        validate_api_base(&api_base).map_err(config_err)?;

        let web_host = non_empty(inputs.web_host)
            .or_else(|| non_empty(file.web_host.clone()))
            .unwrap_or_else(|| DEFAULT_WEB_HOST.to_string());
        validate_web_host(&web_host).map_err(config_err)?;

        Ok(Settings {
            token,
            repo,
            output: cwd.join(output),
            api_base: api_base.trim_end_matches('/').to_string(),
            web_host,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn config_err(e: impl std::fmt::Display) -> ChangelogError {
    ChangelogError::Configuration(e.to_string())
}
