//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Release`] - A tagged release as published on the forge
//! - [`Issue`] - A closed issue (which may secretly be a pull request)
//! - [`PullRequest`] - A closed pull request, merged or not
//! - [`RepoSlug`] - Validated `owner/name` repository identifier
//!
//! # Validation
//!
//! Records fetched from the forge are taken as-is; only the repository slug
//! is validated at construction time. Missing timestamps are represented
//! with `Option` and rejected later, at the point a comparison needs them.
//!
//! # Examples
//!
//! ```
//! use changelog_forge::core::types::RepoSlug;
//!
//! let slug = RepoSlug::parse("octocat/hello-world").unwrap();
//! assert_eq!(slug.owner(), "octocat");
//! assert_eq!(slug.name(), "hello-world");
//!
//! assert!(RepoSlug::parse("no-slash").is_err());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid repository slug '{0}': expected 'owner/name'")]
    InvalidSlug(String),

    #[error("invalid repository component: {0}")]
    InvalidComponent(String),
}

/// A release of the repository.
///
/// `published_at` is `None` for drafts and other unpublished releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Git tag the release points at (unique per repository)
    pub tag: String,
    /// Web URL of the release page
    pub url: String,
    /// When the release was published
    pub published_at: Option<DateTime<Utc>>,
}

impl Release {
    /// Create a published release.
    pub fn published(
        tag: impl Into<String>,
        url: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tag: tag.into(),
            url: url.into(),
            published_at: Some(published_at),
        }
    }
}

/// A closed issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Web URL of the issue
    pub url: String,
    /// When the issue was closed
    pub closed_at: Option<DateTime<Utc>>,
    /// The issues endpoint also lists pull requests; those carry this flag.
    pub is_pull_request: bool,
}

/// A closed pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Web URL of the PR
    pub url: String,
    /// When the PR was merged; `None` if closed without merging
    pub merged_at: Option<DateTime<Utc>>,
    /// Author login
    pub author: String,
    /// Author profile URL
    pub author_url: String,
}

/// A repository identified by owner and name.
///
/// # Example
///
/// ```
/// use changelog_forge::core::types::RepoSlug;
///
/// let slug = RepoSlug::new("octocat", "hello-world").unwrap();
/// assert_eq!(slug.to_string(), "octocat/hello-world");
///
/// assert!(RepoSlug::new("", "hello-world").is_err());
/// assert!(RepoSlug::new("octocat", "a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Create a slug from separate owner and name components.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, TypeError> {
        let owner = owner.into();
        let name = name.into();
        validate_component(&owner)?;
        validate_component(&name)?;
        Ok(Self { owner, name })
    }

    /// Parse an `owner/name` string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let (owner, name) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| TypeError::InvalidSlug(s.to_string()))?;
        Self::new(owner, name).map_err(|_| TypeError::InvalidSlug(s.to_string()))
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn validate_component(s: &str) -> Result<(), TypeError> {
    if s.is_empty() {
        return Err(TypeError::InvalidComponent("empty".to_string()));
    }
    if s.contains('/') || s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TypeError::InvalidComponent(s.to_string()));
    }
    Ok(())
}
