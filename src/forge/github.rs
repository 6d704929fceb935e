//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Design
//!
//! This module implements the `Forge` trait for GitHub with three list
//! endpoints:
//! - `GET /repos/{owner}/{repo}/releases`
//! - `GET /repos/{owner}/{repo}/issues?state=closed&since=...`
//! - `GET /repos/{owner}/{repo}/pulls?state=closed`
//!
//! Each call fetches a single page of up to 100 items. Pagination is not
//! followed.
//!
//! # Rate Limiting
//!
//! Returns `ForgeError::RateLimited` when limits are hit. There is no
//! automatic retry.
//!
//! # Example
//!
//! ```ignore
//! use changelog_forge::forge::github::GitHubForge;
//! use changelog_forge::forge::Forge;
//!
//! let forge = GitHubForge::new(token, &slug);
//! let releases = forge.list_releases().await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{Forge, ForgeError};
use crate::core::config::{Token, DEFAULT_API_BASE};
use crate::core::types::{Issue, PullRequest, Release, RepoSlug};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "changelog-forge";

/// Items requested per list call (GitHub's maximum page size).
const PER_PAGE: &str = "100";

/// GitHub forge implementation.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// API token
    token: Token,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubForge {
    /// Create a GitHub forge for `repo` against the public API.
    pub fn new(token: Token, repo: &RepoSlug) -> Self {
        Self::with_api_base(token, repo, DEFAULT_API_BASE)
    }

    /// Create a GitHub forge with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g., `https://github.example.com/api/v3`).
    pub fn with_api_base(token: Token, repo: &RepoSlug, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            owner: repo.owner().to_string(),
            repo: repo.name().to_string(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        if self.token.expose().is_empty() {
            return Err(ForgeError::AuthRequired);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token.expose()))
            .map_err(|_| ForgeError::AuthFailed("token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// GET a repository endpoint and decode the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ForgeError> {
        let response = self
            .client
            .get(self.repo_url(path))
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            Err(self.error_from_response(response, status).await)
        }
    }

    /// Map an error response from the API.
    async fn error_from_response(&self, response: Response, status: StatusCode) -> ForgeError {
        // GitHub reports an exhausted primary rate limit as 403 with this header.
        let rate_limit_exhausted = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0");

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if rate_limit_exhausted => ForgeError::RateLimited,
            StatusCode::FORBIDDEN => ForgeError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => {
                ForgeError::NotFound(format!("{}/{}: {}", self.owner, self.repo, message))
            }
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list_releases(&self) -> Result<Vec<Release>, ForgeError> {
        let releases: Vec<GitHubRelease> =
            self.get_json("releases", &[("per_page", PER_PAGE)]).await?;
        Ok(releases.into_iter().map(Into::into).collect())
    }

    async fn list_closed_issues(&self, since: DateTime<Utc>) -> Result<Vec<Issue>, ForgeError> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let issues: Vec<GitHubIssue> = self
            .get_json(
                "issues",
                &[("state", "closed"), ("since", since.as_str()), ("per_page", PER_PAGE)],
            )
            .await?;
        Ok(issues.into_iter().map(Into::into).collect())
    }

    async fn list_closed_pulls(&self) -> Result<Vec<PullRequest>, ForgeError> {
        let pulls: Vec<GitHubPullRequest> = self
            .get_json("pulls", &[("state", "closed"), ("per_page", PER_PAGE)])
            .await?;
        Ok(pulls.into_iter().map(Into::into).collect())
    }
}

// --------------------------------------------------------------------------
// API Response Types
// --------------------------------------------------------------------------

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub release response format.
#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
    html_url: String,
    published_at: Option<DateTime<Utc>>,
}

/// GitHub issue response format.
#[derive(Deserialize)]
struct GitHubIssue {
    number: u64,
    title: String,
    html_url: String,
    closed_at: Option<DateTime<Utc>>,
    /// Present only when the issue is a pull request.
    pull_request: Option<serde_json::Value>,
}

/// GitHub PR list item response format.
#[derive(Deserialize)]
struct GitHubPullRequest {
    number: u64,
    title: String,
    html_url: String,
    merged_at: Option<DateTime<Utc>>,
    /// `null` when the author account was deleted
    user: Option<GitHubUser>,
}

/// Minimal GitHub user info.
#[derive(Deserialize)]
struct GitHubUser {
    login: String,
    html_url: String,
}

impl From<GitHubRelease> for Release {
    fn from(gh: GitHubRelease) -> Self {
        Release {
            tag: gh.tag_name,
            url: gh.html_url,
            published_at: gh.published_at,
        }
    }
}

impl From<GitHubIssue> for Issue {
    fn from(gh: GitHubIssue) -> Self {
        Issue {
            number: gh.number,
            title: gh.title,
            url: gh.html_url,
            closed_at: gh.closed_at,
            is_pull_request: gh.pull_request.is_some(),
        }
    }
}

impl From<GitHubPullRequest> for PullRequest {
    fn from(gh: GitHubPullRequest) -> Self {
        let (author, author_url) = match gh.user {
            Some(user) => (user.login, user.html_url),
            None => ("ghost".to_string(), "https://github.com/ghost".to_string()),
        };

        PullRequest {
            number: gh.number,
            title: gh.title,
            url: gh.html_url,
            merged_at: gh.merged_at,
            author,
            author_url,
        }
    }
}
