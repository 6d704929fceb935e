//! core::window
//!
//! Selects the issues and pull requests that belong to a release.
//!
//! # Window
//!
//! The window is the open interval `(previous.published_at,
//! next.published_at)`. Both bounds are exclusive: an issue closed at the
//! exact instant a release was published belongs to neither side.
//!
//! When there is no previous release the window has no lower bound and
//! selects nothing. A first release would otherwise list the entire history
//! of the repository.
//!
//! Results keep the order of the source listing.

use chrono::{DateTime, Utc};

use super::errors::ChangelogError;
use super::types::{Issue, PullRequest, Release};

/// Time window between two releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseWindow {
    since: Option<DateTime<Utc>>,
    until: DateTime<Utc>,
}

impl ReleaseWindow {
    /// Build the window for a release pair.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::InvalidRelease`] if `next`, or `previous`
    /// when present, has no publish timestamp.
    pub fn new(previous: Option<&Release>, next: &Release) -> Result<Self, ChangelogError> {
        let until = published_at(next)?;
        let since = previous.map(published_at).transpose()?;
        Ok(Self { since, until })
    }

    /// Lower bound, if there is a previous release.
    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    /// Upper bound: the publish time of the next release.
    pub fn until(&self) -> DateTime<Utc> {
        self.until
    }

    /// Whether `at` falls strictly inside the window.
    ///
    /// Always false for a window without a lower bound.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match self.since {
            Some(since) => since < at && at < self.until,
            None => false,
        }
    }
}

fn published_at(release: &Release) -> Result<DateTime<Utc>, ChangelogError> {
    release
        .published_at
        .ok_or_else(|| ChangelogError::InvalidRelease(release.tag.clone()))
}

/// Keep the issues closed inside the window, dropping pull requests.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use changelog_forge::core::types::{Issue, Release};
/// use changelog_forge::core::window::filter_issues;
///
/// let v1 = Release::published("v1.0", "u1", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// let v2 = Release::published("v2.0", "u2", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
/// let issue = Issue {
///     number: 7,
///     title: "Crash on start".into(),
///     url: "https://github.com/o/r/issues/7".into(),
///     closed_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
///     is_pull_request: false,
/// };
///
/// let kept = filter_issues(vec![issue], Some(&v1), &v2).unwrap();
/// assert_eq!(kept.len(), 1);
/// ```
pub fn filter_issues(
    issues: Vec<Issue>,
    previous: Option<&Release>,
    next: &Release,
) -> Result<Vec<Issue>, ChangelogError> {
    let window = ReleaseWindow::new(previous, next)?;
    Ok(issues
        .into_iter()
        .filter(|issue| !issue.is_pull_request)
        .filter(|issue| issue.closed_at.is_some_and(|at| window.contains(at)))
        .collect())
}

/// Keep the pull requests merged inside the window.
///
/// Pull requests closed without merging are never kept.
pub fn filter_pulls(
    pulls: Vec<PullRequest>,
    previous: Option<&Release>,
    next: &Release,
) -> Result<Vec<PullRequest>, ChangelogError> {
    let window = ReleaseWindow::new(previous, next)?;
    Ok(pulls
        .into_iter()
        .filter(|pr| pr.merged_at.is_some_and(|at| window.contains(at)))
        .collect())
}
