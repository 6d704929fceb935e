//! Integration tests for the changelog-forge binary.
//!
//! These tests run the compiled binary against a wiremock GitHub API and a
//! temp project directory. The environment is scrubbed of every variable
//! the binary reads so the host machine cannot leak into a run.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO_PATH: &str = "/repos/octocat/hello-world";

/// Get a command for running changelog-forge in `dir` with a clean environment.
fn changelog_forge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("changelog-forge").unwrap();
    for var in [
        "INPUT_TOKEN",
        "INPUT_OWNER",
        "INPUT_REPO",
        "GITHUB_TOKEN",
        "GITHUB_REPOSITORY",
        "GITHUB_ACTIONS",
        "CHANGELOG_FORGE_CONFIG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.arg("--cwd").arg(dir);
    cmd
}

/// Serve the two-release scenario.
async fn scenario_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/releases", REPO_PATH)))
        .and(header("authorization", "Bearer ghp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "tag_name": "v2.0",
                "html_url": "https://github.com/octocat/hello-world/releases/tag/v2.0",
                "published_at": "2024-03-01T00:00:00Z"
            },
            {
                "tag_name": "v1.0",
                "html_url": "https://github.com/octocat/hello-world/releases/tag/v1.0",
                "published_at": "2024-01-01T00:00:00Z"
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{}/issues", REPO_PATH)))
        .and(query_param("state", "closed"))
        .and(query_param("since", "2024-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "number": 7,
                "title": "Crash on start",
                "html_url": "https://github.com/octocat/hello-world/issues/7",
                "closed_at": "2024-02-01T00:00:00Z"
            },
            {
                "number": 9,
                "title": "Fix crash",
                "html_url": "https://github.com/octocat/hello-world/pull/9",
                "closed_at": "2024-02-15T00:00:00Z",
                "pull_request": { "url": "https://api.github.com/repos/octocat/hello-world/pulls/9" }
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{}/pulls", REPO_PATH)))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "number": 9,
                "title": "Fix crash",
                "html_url": "https://github.com/octocat/hello-world/pull/9",
                "merged_at": "2024-02-15T00:00:00Z",
                "user": { "login": "alice", "html_url": "https://github.com/alice" }
            }
        ])))
        .mount(&server)
        .await;

    server
}

const EXPECTED_CHANGELOG: &str = "\
# Changelog

## [v2.0](https://github.com/octocat/hello-world/releases/tag/v2.0) (2024-03-01)

[Full Changelog](https://github.com/octocat/hello-world/compare/v1.0...v2.0)

**Closed issues:**

- Crash on start [#7](https://github.com/octocat/hello-world/issues/7)

**Merged pull requests:**

- Fix crash [#9](https://github.com/octocat/hello-world/pull/9) ([alice](https://github.com/alice))
";

// =============================================================================
// Basic Flags
// =============================================================================

#[test]
fn version_flag_works() {
    let temp = TempDir::new().unwrap();
    changelog_forge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("changelog-forge"));
}

#[test]
fn help_flag_works() {
    let temp = TempDir::new().unwrap();
    changelog_forge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--token"));
}

#[test]
fn completion_emits_script() {
    let temp = TempDir::new().unwrap();
    changelog_forge(temp.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("changelog-forge"));
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn missing_token_fails() {
    let temp = TempDir::new().unwrap();
    changelog_forge(temp.path())
        .args(["--repo", "octocat/hello-world"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("token"));

    assert!(!temp.path().join("CHANGELOG.md").exists());
}

#[test]
fn missing_repo_fails_outside_git_checkout() {
    let temp = TempDir::new().unwrap();
    changelog_forge(temp.path())
        .args(["--token", "ghp_secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repo"))
        .stderr(predicate::str::contains("ghp_secret").not());
}

#[test]
fn unknown_config_key_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".changelog-forge.toml"),
        "token = \"ghp_in_file\"\n",
    )
    .unwrap();

    changelog_forge(temp.path())
        .args(["--token", "ghp_secret", "--repo", "octocat/hello-world"])
        .assert()
        .failure();
}

// =============================================================================
// End-to-End Runs
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn writes_changelog_from_api() {
    let server = scenario_server().await;
    let temp = TempDir::new().unwrap();

    changelog_forge(temp.path())
        .args(["--token", "ghp_secret", "--repo", "octocat/hello-world"])
        .args(["--api-base", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghp_secret").not())
        .stderr(predicate::str::contains("ghp_secret").not());

    let doc = fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(doc, EXPECTED_CHANGELOG);
}

#[tokio::test(flavor = "multi_thread")]
async fn action_inputs_come_from_environment() {
    let server = scenario_server().await;
    let temp = TempDir::new().unwrap();

    changelog_forge(temp.path())
        .env("INPUT_TOKEN", "ghp_secret")
        .env("INPUT_OWNER", "octocat")
        .env("INPUT_REPO", "hello-world")
        .env("GITHUB_ACTIONS", "true")
        .args(["--api-base", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("::add-mask::ghp_secret\n"));

    let doc = fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(doc, EXPECTED_CHANGELOG);
}

#[tokio::test(flavor = "multi_thread")]
async fn dry_run_prints_without_writing() {
    let server = scenario_server().await;
    let temp = TempDir::new().unwrap();

    changelog_forge(temp.path())
        .args(["--token", "ghp_secret", "--repo", "octocat/hello-world"])
        .args(["--api-base", &server.uri(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## [v2.0]"))
        .stdout(predicate::str::contains("- Crash on start [#7]"));

    assert!(!temp.path().join("CHANGELOG.md").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn rerun_leaves_changelog_unchanged() {
    let server = scenario_server().await;
    let temp = TempDir::new().unwrap();
    let run = || {
        changelog_forge(temp.path())
            .args(["--token", "ghp_secret", "--repo", "octocat/hello-world"])
            .args(["--api-base", &server.uri()])
            .assert()
            .success();
    };

    run();
    run();

    let doc = fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(doc, EXPECTED_CHANGELOG);
}

#[tokio::test(flavor = "multi_thread")]
async fn api_failure_exits_nonzero_and_keeps_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/releases", REPO_PATH)))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("CHANGELOG.md"), "# Changelog\n\nold\n").unwrap();

    changelog_forge(temp.path())
        .args(["--token", "ghp_secret", "--repo", "octocat/hello-world"])
        .args(["--api-base", &server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));

    let doc = fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(doc, "# Changelog\n\nold\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn config_file_supplies_repository() {
    let server = scenario_server().await;
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".changelog-forge.toml"),
        format!(
            "owner = \"octocat\"\nrepo = \"hello-world\"\noutput = \"docs/CHANGES.md\"\napi_base = \"{}\"\n",
            server.uri()
        ),
    )
    .unwrap();

    changelog_forge(temp.path())
        .args(["--token", "ghp_secret"])
        .assert()
        .success();

    let doc = fs::read_to_string(temp.path().join("docs").join("CHANGES.md")).unwrap();
    assert_eq!(doc, EXPECTED_CHANGELOG);
}
