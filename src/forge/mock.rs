//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge serves canned releases, issues and pull requests from
//! memory, records every call, and can be configured to fail a specific
//! operation.
//!
//! # Example
//!
//! ```
//! use changelog_forge::forge::mock::MockForge;
//! use changelog_forge::forge::Forge;
//! use changelog_forge::core::types::Release;
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new().with_releases(vec![Release {
//!     tag: "v1.0".to_string(),
//!     url: "https://github.com/o/r/releases/tag/v1.0".to_string(),
//!     published_at: None,
//! }]);
//!
//! let releases = forge.list_releases().await.unwrap();
//! assert_eq!(releases[0].tag, "v1.0");
//! # });
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use super::traits::{Forge, ForgeError};
use crate::core::types::{Issue, PullRequest, Release};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    releases: Vec<Release>,
    issues: Vec<Issue>,
    pulls: Vec<PullRequest>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail list_releases with the given error.
    ListReleases(ForgeError),
    /// Fail list_closed_issues with the given error.
    ListClosedIssues(ForgeError),
    /// Fail list_closed_pulls with the given error.
    ListClosedPulls(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    ListReleases,
    ListClosedIssues { since: DateTime<Utc> },
    ListClosedPulls,
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these releases (newest first).
    pub fn with_releases(self, releases: Vec<Release>) -> Self {
        self.lock().releases = releases;
        self
    }

    /// Serve these closed issues.
    ///
    /// The `since` filter of the real API is not emulated; every issue is
    /// returned.
    pub fn with_issues(self, issues: Vec<Issue>) -> Self {
        self.lock().issues = issues;
        self
    }

    /// Serve these closed pull requests.
    pub fn with_pulls(self, pulls: Vec<PullRequest>) -> Self {
        self.lock().pulls = pulls;
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use changelog_forge::forge::mock::{MockForge, FailOn};
    /// use changelog_forge::forge::ForgeError;
    ///
    /// let forge = MockForge::new()
    ///     .fail_on(FailOn::ListReleases(ForgeError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockForgeInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record an operation and return the configured failure, if any.
    fn record(&self, op: MockOperation) -> Result<(), ForgeError> {
        let mut inner = self.lock();
        let failure = match (&inner.fail_on, &op) {
            (Some(FailOn::ListReleases(e)), MockOperation::ListReleases) => Some(e.clone()),
            (Some(FailOn::ListClosedIssues(e)), MockOperation::ListClosedIssues { .. }) => {
                Some(e.clone())
            }
            (Some(FailOn::ListClosedPulls(e)), MockOperation::ListClosedPulls) => Some(e.clone()),
            _ => None,
        };
        inner.operations.push(op);
        failure.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_releases(&self) -> Result<Vec<Release>, ForgeError> {
        self.record(MockOperation::ListReleases)?;
        Ok(self.lock().releases.clone())
    }

    async fn list_closed_issues(&self, since: DateTime<Utc>) -> Result<Vec<Issue>, ForgeError> {
        self.record(MockOperation::ListClosedIssues { since })?;
        Ok(self.lock().issues.clone())
    }

    async fn list_closed_pulls(&self) -> Result<Vec<PullRequest>, ForgeError> {
        self.record(MockOperation::ListClosedPulls)?;
        Ok(self.lock().pulls.clone())
    }
}
