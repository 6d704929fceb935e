//! changelog-forge - Generate CHANGELOG.md sections from GitHub activity
//!
//! changelog-forge looks up the two most recent published releases of a
//! repository, collects the issues closed and pull requests merged between
//! them, and prepends a Markdown section for the newer release to the
//! project's changelog. It runs as a plain CLI or as a GitHub Actions step.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs list -> resolve -> filter -> render -> write
//! - [`core`] - Domain types, release resolution, time windows and config
//! - [`changelog`] - Markdown rendering and document splicing
//! - [`forge`] - Abstraction over the remote forge (GitHub)
//! - [`git`] - Repository detection from the local checkout
//! - [`ui`] - Output and GitHub Actions workflow commands
//!
//! # Correctness Invariants
//!
//! 1. The changelog is written only after every fetch and render succeeded
//! 2. Existing changelog content is preserved byte for byte below the new section
//! 3. The API token never appears in output

pub mod changelog;
pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod git;
pub mod ui;
