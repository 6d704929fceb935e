//! core::release
//!
//! Picks the release pair a changelog section describes.
//!
//! The forge lists releases newest first. The first entry is the release
//! being documented ("next"); the second, if any, bounds the window from
//! below ("previous"). The listing order is trusted as-is and never
//! re-sorted.

use super::errors::ChangelogError;
use super::types::Release;

/// The pair of releases a changelog section spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePair {
    /// Second most recent release; `None` on the first-ever release.
    pub previous: Option<Release>,
    /// Most recent release.
    pub next: Release,
}

impl ReleasePair {
    /// True when there is no earlier release to diff against.
    pub fn is_first_release(&self) -> bool {
        self.previous.is_none()
    }
}

/// Resolve the previous/next release pair from a newest-first listing.
///
/// # Errors
///
/// Returns [`ChangelogError::NoReleaseFound`] if `releases` is empty.
///
/// # Example
///
/// ```
/// use changelog_forge::core::release::resolve_releases;
/// use changelog_forge::core::types::Release;
///
/// let releases = vec![
///     Release { tag: "v2.0".into(), url: "u2".into(), published_at: None },
///     Release { tag: "v1.0".into(), url: "u1".into(), published_at: None },
/// ];
/// let pair = resolve_releases(releases).unwrap();
/// assert_eq!(pair.next.tag, "v2.0");
/// assert_eq!(pair.previous.unwrap().tag, "v1.0");
/// ```
pub fn resolve_releases(releases: Vec<Release>) -> Result<ReleasePair, ChangelogError> {
    let mut iter = releases.into_iter();
    let next = iter.next().ok_or(ChangelogError::NoReleaseFound)?;
    let previous = iter.next();
    Ok(ReleasePair { previous, next })
}
