//! git
//!
//! Repository identification from the local Git checkout.
//!
//! # Architecture
//!
//! This module is the only place that imports `git2`. It is read-only: the
//! tool never modifies the repository, it only looks at remote URLs to
//! infer which forge repository the changelog belongs to.
//!
//! # Example
//!
//! ```ignore
//! use changelog_forge::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! if let Some(slug) = git.remote_slug("origin", "github.com")? {
//!     println!("{}", slug);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::RepoSlug;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// Error message from git2
        message: String,
    },
}

/// Read-only handle to a local repository.
pub struct Git {
    repo: git2::Repository,
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// inside the working tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Internal {
                message: e.message().to_string(),
            }),
        }
    }

    /// Owner and name of the forge repository a remote points at.
    ///
    /// Returns `None` if the remote is missing or not hosted on `host`.
    pub fn remote_slug(&self, remote: &str, host: &str) -> Result<Option<RepoSlug>, GitError> {
        Ok(self
            .remote_url(remote)?
            .and_then(|url| parse_remote_url(&url, host)))
    }
}

/// Detect the repository from the `origin` remote at `path`.
///
/// Any failure (no repository, no origin, foreign host) yields `None`.
pub fn detect_repo(path: &Path, host: &str) -> Option<RepoSlug> {
    Git::open(path)
        .ok()?
        .remote_slug("origin", host)
        .ok()
        .flatten()
}

/// Parse a remote URL hosted on `host` into a repository slug.
///
/// Supports both SSH and HTTPS formats:
/// - `git@github.com:owner/repo.git`
/// - `ssh://git@github.com/owner/repo.git`
/// - `https://github.com/owner/repo.git`
/// - `https://github.com/owner/repo`
///
/// # Example
///
/// ```
/// use changelog_forge::git::parse_remote_url;
///
/// let slug = parse_remote_url("git@github.com:octocat/hello-world.git", "github.com").unwrap();
/// assert_eq!(slug.owner(), "octocat");
/// assert_eq!(slug.name(), "hello-world");
/// ```
pub fn parse_remote_url(url: &str, host: &str) -> Option<RepoSlug> {
    let ssh_prefix = format!("git@{}:", host);
    let prefixes = [
        ssh_prefix,
        format!("ssh://git@{}/", host),
        format!("https://{}/", host),
        format!("http://{}/", host),
    ];

    let rest = prefixes.iter().find_map(|p| url.strip_prefix(p.as_str()))?;
    let rest = rest.trim_end_matches('/');
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    RepoSlug::parse(rest).ok()
}
