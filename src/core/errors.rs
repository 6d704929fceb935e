//! core::errors
//!
//! Error taxonomy for a changelog run.
//!
//! Every variant is fatal: nothing is retried or recovered internally, and
//! the document is only written after all data has been fetched and
//! rendered, so a failed run never leaves a partial changelog behind.
//!
//! # Example
//!
//! ```
//! use changelog_forge::core::errors::ChangelogError;
//!
//! let err = ChangelogError::Configuration("missing token".to_string());
//! assert_eq!(err.to_string(), "configuration error: missing token");
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::forge::ForgeError;

/// Errors from generating a changelog.
///
/// # Security
///
/// No variant carries the API token. Configuration errors name the missing
/// input, never its value.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A required input (token, repository) is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The forge API call failed.
    #[error("upstream error: {0}")]
    Upstream(#[from] ForgeError),

    /// The repository has no releases at all.
    #[error("no release found: the repository has no releases to generate a changelog for")]
    NoReleaseFound,

    /// A release lacks the publish timestamp needed for comparison.
    #[error("invalid release '{0}': release has no publish date (draft or unpublished)")]
    InvalidRelease(String),

    /// Reading the existing changelog document failed.
    #[error("failed to read changelog '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the changelog document failed.
    #[error("failed to write changelog '{path}': {source}")]
    WriteDocument {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_wraps_forge_error() {
        let err: ChangelogError = ForgeError::RateLimited.into();
        assert!(matches!(err, ChangelogError::Upstream(ForgeError::RateLimited)));
        assert_eq!(err.to_string(), "upstream error: rate limited");
    }

    #[test]
    fn invalid_release_names_tag() {
        let err = ChangelogError::InvalidRelease("v2.0".to_string());
        assert!(err.to_string().contains("v2.0"));
    }

    #[test]
    fn document_errors_include_path() {
        let err = ChangelogError::WriteDocument {
            path: PathBuf::from("CHANGELOG.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("CHANGELOG.md"));
        assert!(msg.contains("denied"));
    }
}
