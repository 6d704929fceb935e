//! core
//!
//! Core domain types, configuration, and the release-delta computation.
//!
//! # Modules
//!
//! - [`types`] - Release, Issue, PullRequest, RepoSlug
//! - [`errors`] - Error taxonomy for a run
//! - [`config`] - Configuration file and resolved run settings
//! - [`release`] - Picks the previous/next release pair
//! - [`window`] - Filters issues and pull requests into the release window
//!
//! # Design Principles
//!
//! - Pure functions over already-fetched data; no I/O outside `config`
//! - Listing order from the forge is preserved, never re-sorted

pub mod config;
pub mod errors;
pub mod release;
pub mod types;
pub mod window;
