//! changelog::render
//!
//! Markdown templates for one changelog section.
//!
//! # Format
//!
//! ```text
//! ## [v2.0](https://github.com/o/r/releases/tag/v2.0) (2024-03-01)
//!
//! [Full Changelog](https://github.com/o/r/compare/v1.0...v2.0)
//!
//! **Closed issues:**
//!
//! - Crash on start [#1](https://github.com/o/r/issues/1)
//!
//! **Merged pull requests:**
//!
//! - Add feature [#2](https://github.com/o/r/pull/2) ([alice](https://github.com/alice))
//! ```
//!
//! Subsections are omitted when empty. On the first release there is no
//! previous tag to compare against, so the link points at the commit
//! history of the tag instead:
//! `[Full Changelog](https://github.com/o/r/commits/v1.0)`.
//!
//! The fragment has no leading or trailing newline; spacing between
//! fragments is owned by [`super::document::splice`].

use chrono::{DateTime, Utc};

use crate::core::errors::ChangelogError;
use crate::core::release::ReleasePair;
use crate::core::types::{Issue, PullRequest, Release, RepoSlug};

/// Subheading introducing the closed issues.
pub const CLOSED_ISSUES_HEADING: &str = "**Closed issues:**";

/// Subheading introducing the merged pull requests.
pub const MERGED_PULLS_HEADING: &str = "**Merged pull requests:**";

/// Everything needed to render one release's section.
#[derive(Debug, Clone)]
pub struct ChangelogSection {
    /// Releases bounding the section
    pub pair: ReleasePair,
    /// Issues closed in the window, in listing order
    pub issues: Vec<Issue>,
    /// Pull requests merged in the window, in listing order
    pub pulls: Vec<PullRequest>,
}

impl ChangelogSection {
    /// True when neither issues nor pull requests qualified.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.pulls.is_empty()
    }
}

/// Render a section as a markdown fragment.
///
/// # Errors
///
/// Returns [`ChangelogError::InvalidRelease`] if the next release has no
/// publish date to put in the header.
pub fn render(
    section: &ChangelogSection,
    repo: &RepoSlug,
    web_host: &str,
) -> Result<String, ChangelogError> {
    let next = &section.pair.next;
    let published_at = next
        .published_at
        .ok_or_else(|| ChangelogError::InvalidRelease(next.tag.clone()))?;

    let mut fragment = header_line(next, published_at);
    fragment.push_str("\n\n");
    fragment.push_str(&compare_line(
        web_host,
        repo,
        section.pair.previous.as_ref(),
        next,
    ));

    if !section.issues.is_empty() {
        fragment.push_str("\n\n");
        fragment.push_str(&issues_block(&section.issues));
    }

    if !section.pulls.is_empty() {
        fragment.push_str("\n\n");
        fragment.push_str(&pulls_block(&section.pulls));
    }

    Ok(fragment)
}

/// `## [<tag>](<url>) (<YYYY-MM-DD>)`
pub fn header_line(release: &Release, published_at: DateTime<Utc>) -> String {
    format!(
        "## [{}]({}) ({})",
        release.tag,
        release.url,
        published_at.format("%Y-%m-%d")
    )
}

/// Link to the diff between the two releases, or to the tag's history on
/// the first release.
pub fn compare_line(
    web_host: &str,
    repo: &RepoSlug,
    previous: Option<&Release>,
    next: &Release,
) -> String {
    match previous {
        Some(previous) => format!(
            "[Full Changelog](https://{}/{}/{}/compare/{}...{})",
            web_host,
            repo.owner(),
            repo.name(),
            previous.tag,
            next.tag
        ),
        None => format!(
            "[Full Changelog](https://{}/{}/{}/commits/{})",
            web_host,
            repo.owner(),
            repo.name(),
            next.tag
        ),
    }
}

/// `- <title> [#<number>](<url>)`
pub fn issue_line(issue: &Issue) -> String {
    format!("- {} [#{}]({})", issue.title, issue.number, issue.url)
}

/// `- <title> [#<number>](<url>) ([<author>](<author url>))`
pub fn pull_line(pr: &PullRequest) -> String {
    format!(
        "- {} [#{}]({}) ([{}]({}))",
        pr.title, pr.number, pr.url, pr.author, pr.author_url
    )
}

fn issues_block(issues: &[Issue]) -> String {
    block(CLOSED_ISSUES_HEADING, issues.iter().map(issue_line))
}

fn pulls_block(pulls: &[PullRequest]) -> String {
    block(MERGED_PULLS_HEADING, pulls.iter().map(pull_line))
}

fn block(heading: &str, lines: impl Iterator<Item = String>) -> String {
    let mut out = format!("{}\n", heading);
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    out
}
