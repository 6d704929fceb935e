//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing
//! - [`actions`] - GitHub Actions workflow commands (secret masking)

pub mod actions;
pub mod output;
