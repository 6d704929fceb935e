//! cli::commands::generate
//!
//! Generate the changelog section for the latest release.
//!
//! # Design
//!
//! The command:
//! - Masks the token with the Actions runner before printing anything
//! - Resolves settings from flags, environment and config file
//! - Runs the engine pipeline and reports the outcome
//!
//! The token is never printed.
//!
//! # Example
//!
//! ```bash
//! # Update CHANGELOG.md
//! changelog-forge --repo octocat/hello-world
//!
//! # Print the section without writing
//! changelog-forge --repo octocat/hello-world --dry-run
//! ```

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::changelog::WriteDecision;
use crate::cli::args::GenerateArgs;
use crate::core::config::{Config, Inputs, Settings, Token, DEFAULT_WEB_HOST};
use crate::engine::{self, Context};
use crate::forge::github::GitHubForge;
use crate::git;
use crate::ui::{actions, output};

/// Run the generate command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(generate_async(ctx, args))
}

/// Async implementation of generate.
async fn generate_async(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = match &ctx.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };

    let inputs = collect_inputs(args.clone());
    if let Some(token) = &inputs.token {
        actions::mask(token.expose());
    }

    let config = Config::load(&cwd, args.config.as_deref())?;
    if let Some(path) = config.loaded_from() {
        output::debug(format!("loaded config from {}", path.display()), verbosity);
    }

    let detect_host = inputs
        .web_host
        .clone()
        .or_else(|| config.file.web_host.clone())
        .unwrap_or_else(|| DEFAULT_WEB_HOST.to_string());
    let settings = Settings::resolve(&cwd, inputs, &config.file, || {
        git::detect_repo(&cwd, &detect_host)
    })?;
    output::debug(
        format!(
            "repository {}, changelog {}",
            settings.repo,
            settings.output.display()
        ),
        verbosity,
    );

    let forge = GitHubForge::with_api_base(
        settings.token.clone(),
        &settings.repo,
        settings.api_base.clone(),
    );

    let outcome = engine::generate(&forge, &settings, ctx).await?;

    if ctx.dry_run {
        println!("{}", outcome.fragment);
        return Ok(());
    }

    let path = display_path(&outcome.path, &cwd);
    match outcome.decision {
        WriteDecision::Write => {
            output::print(format!("Changelog updated: {}", path), verbosity);
        }
        WriteDecision::AlreadyPresent => {
            output::print(
                format!(
                    "Changelog already up to date: {} has a section for {}",
                    path, outcome.section.pair.next.tag
                ),
                verbosity,
            );
        }
        WriteDecision::NothingToAdd => {
            output::warn(
                format!(
                    "No closed issues or merged pull requests since {}; {} left unchanged",
                    outcome
                        .section
                        .pair
                        .previous
                        .as_ref()
                        .map(|r| r.tag.as_str())
                        .unwrap_or("the previous release"),
                    path
                ),
                verbosity,
            );
        }
    }

    Ok(())
}

/// Merge CLI flags with the environment variables clap does not cover.
fn collect_inputs(args: GenerateArgs) -> Inputs {
    let token = args
        .token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .map(Token::new);

    Inputs {
        token,
        owner: args.owner,
        repo: args.repo,
        output: args.output,
        api_base: args.api_base,
        web_host: args.web_host,
        github_repository: std::env::var("GITHUB_REPOSITORY").ok(),
    }
}

fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}
