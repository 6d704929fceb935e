//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Inputs
//!
//! Generation inputs are top-level flags so the binary can run as a
//! GitHub Actions step with no arguments at all. Each input also reads the
//! `INPUT_*` variable the Actions runner sets for `with:` entries.
//!
//! # Global Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generate CHANGELOG.md sections from GitHub releases, issues and pull requests
#[derive(Parser, Debug)]
#[command(name = "changelog-forge")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Update CHANGELOG.md for the repository in the current directory
    GITHUB_TOKEN=ghp_xxx changelog-forge

    # Explicit repository, preview only
    changelog-forge --repo octocat/hello-world --dry-run

    # GitHub Enterprise
    changelog-forge --api-base https://github.example.com/api/v3 --web-host github.example.com")]
pub struct Cli {
    /// Run as if changelog-forge was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Inputs for generating the changelog.
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// API token (falls back to $GITHUB_TOKEN)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository owner (user or organization)
    #[arg(long, env = "INPUT_OWNER")]
    pub owner: Option<String>,

    /// Repository name, or owner/name
    #[arg(long, env = "INPUT_REPO")]
    pub repo: Option<String>,

    /// Changelog file to update [default: CHANGELOG.md]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// REST API base URL [default: https://api.github.com]
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Web host used in compare links [default: github.com]
    #[arg(long, value_name = "HOST")]
    pub web_host: Option<String>,

    /// Config file to load instead of the default locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the rendered section instead of writing the changelog
    #[arg(long)]
    pub dry_run: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate shell completion scripts
    #[command(after_help = "\
INSTALLATION:
    # Bash
    changelog-forge completion bash >> ~/.bashrc

    # Zsh
    changelog-forge completion zsh >> ~/.zshrc

    # Fish
    changelog-forge completion fish > ~/.config/fish/completions/changelog-forge.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
