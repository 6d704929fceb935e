//! changelog
//!
//! Markdown rendering and the persisted changelog document.
//!
//! # Modules
//!
//! - [`render`] - Fragment templates for one release section
//! - [`document`] - Splicing a fragment into the document, write policy, file I/O
//!
//! Nothing in this module performs network I/O.

pub mod document;
pub mod render;

pub use document::{plan_write, read_document, splice, write_document, WriteDecision, TITLE};
pub use render::{render, ChangelogSection};
