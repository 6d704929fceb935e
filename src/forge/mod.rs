//! forge
//!
//! Abstraction for the remote hosting service the changelog is built from.
//!
//! # Architecture
//!
//! The `Forge` trait defines the read-only surface the engine consumes:
//! releases, closed issues and closed pull requests of one repository.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and `ForgeError`
//! - [`github`]: GitHub REST implementation
//! - [`mock`]: In-memory implementation for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use changelog_forge::forge::{github::GitHubForge, Forge};
//! use changelog_forge::core::types::RepoSlug;
//!
//! let slug = RepoSlug::parse("octocat/hello-world")?;
//! let forge = GitHubForge::new(token, &slug);
//!
//! for release in forge.list_releases().await? {
//!     println!("{}", release.tag);
//! }
//! ```

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
