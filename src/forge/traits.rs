//! forge::traits
//!
//! Forge trait definition for reading release history from a hosting service.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` and are called once per run, in sequence.
//! There is no retry; the first failure aborts the run.
//!
//! # Example
//!
//! ```ignore
//! use changelog_forge::forge::Forge;
//!
//! async fn latest(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     let releases = forge.list_releases().await?;
//!     if let Some(release) = releases.first() {
//!         println!("Latest release: {}", release.tag);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::types::{Issue, PullRequest, Release};

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like GitHub.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// The Forge trait for reading a repository's release history.
///
/// Implementations are bound to a single repository at construction time.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. The engine does not handle
/// any variant specially; each aborts the run with its message.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// List releases, newest first.
    ///
    /// Order is whatever the service returns; callers do not re-sort.
    async fn list_releases(&self) -> Result<Vec<Release>, ForgeError>;

    /// List closed issues updated at or after `since`.
    ///
    /// The listing may include pull requests; those have
    /// [`Issue::is_pull_request`] set.
    async fn list_closed_issues(&self, since: DateTime<Utc>) -> Result<Vec<Issue>, ForgeError>;

    /// List closed pull requests, merged or not.
    async fn list_closed_pulls(&self) -> Result<Vec<PullRequest>, ForgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forge_error_display() {
        assert_eq!(
            format!("{}", ForgeError::AuthRequired),
            "authentication required"
        );
        assert_eq!(
            format!("{}", ForgeError::AuthFailed("expired token".into())),
            "authentication failed: expired token"
        );
        assert_eq!(
            format!("{}", ForgeError::NotFound("octocat/nope".into())),
            "not found: octocat/nope"
        );
        assert_eq!(format!("{}", ForgeError::RateLimited), "rate limited");
        assert_eq!(
            format!(
                "{}",
                ForgeError::ApiError {
                    status: 422,
                    message: "Validation failed".into()
                }
            ),
            "API error: 422 - Validation failed"
        );
        assert_eq!(
            format!("{}", ForgeError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
    }
}
