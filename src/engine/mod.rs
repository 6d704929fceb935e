//! engine
//!
//! Orchestrates a changelog run.
//!
//! # Lifecycle
//!
//! Every run is strictly sequential:
//!
//! ```text
//! list releases -> resolve pair -> list issues/pulls -> filter -> render -> write
//! ```
//!
//! # Invariants
//!
//! - The first failure aborts the run; nothing is retried
//! - The document is written last, after every fetch and render succeeded
//! - Nothing is written in dry-run mode

pub mod runner;

pub use runner::{generate, RunOutcome};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for a run.
///
/// Contains global settings derived from CLI flags that affect behavior
/// but not the content of the changelog.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Render only; never write the document.
    pub dry_run: bool,
}

impl Context {
    /// Output verbosity for this run.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
