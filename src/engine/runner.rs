//! engine::runner
//!
//! The single entry point for generating a changelog section.
//!
//! # Example
//!
//! ```ignore
//! use changelog_forge::engine::{generate, Context};
//!
//! let outcome = generate(&forge, &settings, &Context::default()).await?;
//! if outcome.written {
//!     println!("Updated {}", outcome.path.display());
//! }
//! ```

use std::path::PathBuf;

use super::Context;
use crate::changelog::{plan_write, read_document, render, splice, write_document};
use crate::changelog::{ChangelogSection, WriteDecision};
use crate::core::config::Settings;
use crate::core::errors::ChangelogError;
use crate::core::release::resolve_releases;
use crate::core::window::{filter_issues, filter_pulls, ReleaseWindow};
use crate::forge::Forge;
use crate::ui::output;

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The rendered section
    pub section: ChangelogSection,
    /// Markdown fragment for the section
    pub fragment: String,
    /// What the write policy decided
    pub decision: WriteDecision,
    /// Whether the document was actually written
    pub written: bool,
    /// Path of the changelog document
    pub path: PathBuf,
}

/// Fetch, filter, render and (maybe) write one changelog section.
///
/// Issues and pull requests are only fetched when there is a previous
/// release; on the first release the section is always empty.
///
/// # Errors
///
/// Any [`ChangelogError`]; the document is untouched on error.
pub async fn generate(
    forge: &dyn Forge,
    settings: &Settings,
    ctx: &Context,
) -> Result<RunOutcome, ChangelogError> {
    let verbosity = ctx.verbosity();

    output::debug(
        format!("listing releases of {} via {}", settings.repo, forge.name()),
        verbosity,
    );
    let releases = forge.list_releases().await?;
    let pair = resolve_releases(releases)?;
    let window = ReleaseWindow::new(pair.previous.as_ref(), &pair.next)?;

    output::debug(
        format!(
            "next release: {}, previous release: {}",
            pair.next.tag,
            pair.previous
                .as_ref()
                .map(|r| r.tag.as_str())
                .unwrap_or("(none)")
        ),
        verbosity,
    );

    let (issues, pulls) = match window.since() {
        Some(since) => {
            let issues = forge.list_closed_issues(since).await?;
            let pulls = forge.list_closed_pulls().await?;
            output::debug(
                format!(
                    "fetched {} closed issues, {} closed pull requests",
                    issues.len(),
                    pulls.len()
                ),
                verbosity,
            );
            (issues, pulls)
        }
        None => {
            output::debug("first release: no window to diff against", verbosity);
            (Vec::new(), Vec::new())
        }
    };

    let issues = filter_issues(issues, pair.previous.as_ref(), &pair.next)?;
    let pulls = filter_pulls(pulls, pair.previous.as_ref(), &pair.next)?;
    output::debug(
        format!(
            "{} issues and {} pull requests in window",
            issues.len(),
            pulls.len()
        ),
        verbosity,
    );

    let section = ChangelogSection {
        pair,
        issues,
        pulls,
    };
    let fragment = render(&section, &settings.repo, &settings.web_host)?;

    let existing = read_document(&settings.output)?;
    let decision = plan_write(existing.as_deref(), &section);

    let written = decision.should_write() && !ctx.dry_run;
    if written {
        let contents = splice(existing.as_deref(), &fragment);
        write_document(&settings.output, &contents)?;
        output::debug(
            format!("wrote {}", settings.output.display()),
            verbosity,
        );
    }

    Ok(RunOutcome {
        section,
        fragment,
        decision,
        written,
        path: settings.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Token;
    use crate::core::types::{Issue, PullRequest, Release, RepoSlug};
    use crate::forge::mock::{FailOn, MockForge, MockOperation};
    use crate::forge::ForgeError;
    use chrono::{DateTime, TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn release(tag: &str, published_at: DateTime<Utc>) -> Release {
        Release::published(
            tag,
            format!("https://github.com/octocat/hello-world/releases/tag/{}", tag),
            published_at,
        )
    }

    fn issue(number: u64, closed_at: DateTime<Utc>) -> Issue {
        Issue {
            number,
            title: format!("Issue {}", number),
            url: format!("https://github.com/octocat/hello-world/issues/{}", number),
            closed_at: Some(closed_at),
            is_pull_request: false,
        }
    }

    fn pull(number: u64, merged_at: Option<DateTime<Utc>>) -> PullRequest {
        PullRequest {
            number,
            title: format!("PR {}", number),
            url: format!("https://github.com/octocat/hello-world/pull/{}", number),
            merged_at,
            author: "alice".to_string(),
            author_url: "https://github.com/alice".to_string(),
        }
    }

    fn settings(dir: &TempDir) -> Settings {
        Settings {
            token: Token::new("ghp_test"),
            repo: RepoSlug::new("octocat", "hello-world").unwrap(),
            output: dir.path().join("CHANGELOG.md"),
            api_base: "https://api.github.com".to_string(),
            web_host: "github.com".to_string(),
        }
    }

    fn two_release_forge() -> MockForge {
        MockForge::new()
            .with_releases(vec![
                release("v2.0", at(2024, 3, 1)),
                release("v1.0", at(2024, 1, 1)),
            ])
            .with_issues(vec![issue(1, at(2024, 2, 1))])
            .with_pulls(vec![pull(2, Some(at(2024, 2, 15))), pull(3, None)])
    }

    #[tokio::test]
    async fn writes_new_document() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        let outcome = generate(&two_release_forge(), &settings, &Context::default())
            .await
            .unwrap();

        assert!(outcome.written);
        assert_eq!(outcome.section.issues.len(), 1);
        assert_eq!(outcome.section.pulls.len(), 1);

        let doc = fs::read_to_string(&settings.output).unwrap();
        assert!(doc.starts_with("# Changelog\n\n## [v2.0]"));
        assert!(doc.contains("compare/v1.0...v2.0"));
        assert!(doc.contains("- Issue 1 [#1]"));
        assert!(doc.contains("([alice](https://github.com/alice))"));
        assert!(!doc.contains("PR 3"));
    }

    #[tokio::test]
    async fn fetches_issues_since_previous_release() {
        let dir = TempDir::new().unwrap();
        let forge = two_release_forge();

        generate(&forge, &settings(&dir), &Context::default())
            .await
            .unwrap();

        assert_eq!(
            forge.operations(),
            vec![
                MockOperation::ListReleases,
                MockOperation::ListClosedIssues {
                    since: at(2024, 1, 1)
                },
                MockOperation::ListClosedPulls,
            ]
        );
    }

    #[tokio::test]
    async fn first_release_skips_issue_and_pull_fetch() {
        let dir = TempDir::new().unwrap();
        let forge = MockForge::new().with_releases(vec![release("v1.0", at(2024, 1, 1))]);

        let outcome = generate(&forge, &settings(&dir), &Context::default())
            .await
            .unwrap();

        assert_eq!(forge.operations(), vec![MockOperation::ListReleases]);
        assert!(outcome.section.is_empty());
        assert!(outcome.written);
        assert!(outcome.fragment.contains("/commits/v1.0"));
    }

    #[tokio::test]
    async fn no_releases_fails() {
        let dir = TempDir::new().unwrap();
        let err = generate(&MockForge::new(), &settings(&dir), &Context::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ChangelogError::NoReleaseFound));
    }

    #[tokio::test]
    async fn draft_next_release_fails_before_fetching_more() {
        let dir = TempDir::new().unwrap();
        let forge = MockForge::new().with_releases(vec![
            Release {
                tag: "v2.0".to_string(),
                url: "u".to_string(),
                published_at: None,
            },
            release("v1.0", at(2024, 1, 1)),
        ]);

        let err = generate(&forge, &settings(&dir), &Context::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ChangelogError::InvalidRelease(_)));
        assert_eq!(forge.operations(), vec![MockOperation::ListReleases]);
    }

    #[tokio::test]
    async fn upstream_failure_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        fs::write(&settings.output, "# Changelog\n").unwrap();

        let forge = two_release_forge().fail_on(FailOn::ListClosedPulls(ForgeError::RateLimited));
        let err = generate(&forge, &settings, &Context::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ChangelogError::Upstream(ForgeError::RateLimited)));
        assert_eq!(fs::read_to_string(&settings.output).unwrap(), "# Changelog\n");
    }

    #[tokio::test]
    async fn empty_section_does_not_touch_existing_document() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        fs::write(&settings.output, "# Changelog\n").unwrap();

        let forge = MockForge::new().with_releases(vec![
            release("v2.0", at(2024, 3, 1)),
            release("v1.0", at(2024, 1, 1)),
        ]);
        let outcome = generate(&forge, &settings, &Context::default())
            .await
            .unwrap();

        assert_eq!(outcome.decision, WriteDecision::NothingToAdd);
        assert!(!outcome.written);
        assert_eq!(fs::read_to_string(&settings.output).unwrap(), "# Changelog\n");
    }

    #[tokio::test]
    async fn second_run_does_not_duplicate_section() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        generate(&two_release_forge(), &settings, &Context::default())
            .await
            .unwrap();
        let first = fs::read_to_string(&settings.output).unwrap();

        let outcome = generate(&two_release_forge(), &settings, &Context::default())
            .await
            .unwrap();

        assert_eq!(outcome.decision, WriteDecision::AlreadyPresent);
        assert_eq!(fs::read_to_string(&settings.output).unwrap(), first);
    }

    #[tokio::test]
    async fn dry_run_never_writes() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let ctx = Context {
            dry_run: true,
            ..Default::default()
        };

        let outcome = generate(&two_release_forge(), &settings, &ctx)
            .await
            .unwrap();

        assert_eq!(outcome.decision, WriteDecision::Write);
        assert!(!outcome.written);
        assert!(!settings.output.exists());
    }
}
