//! changelog::document
//!
//! The persisted changelog document: read, splice, write.
//!
//! # Layout
//!
//! A title line followed by sections, newest first. A new section is always
//! inserted directly below the title; everything after it is kept
//! byte-for-byte, in its original order. The first line of an existing
//! document is always taken as the title, whatever it contains.
//!
//! # Write Policy
//!
//! [`plan_write`] decides whether a run touches the file at all:
//! - the document already has a section for the release: skip
//! - the document exists and the new section is empty: skip
//! - otherwise: write
//!
//! A document that exists but contains only whitespace is treated as absent.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::render::ChangelogSection;
use crate::core::errors::ChangelogError;

/// Title line of a newly created document.
pub const TITLE: &str = "# Changelog";

/// What a run should do with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Splice the section in and write the document.
    Write,
    /// The existing document already has a section for this release.
    AlreadyPresent,
    /// Nothing qualified and the document already exists.
    NothingToAdd,
}

impl WriteDecision {
    /// Whether the document should be written.
    pub fn should_write(self) -> bool {
        self == WriteDecision::Write
    }
}

/// Decide whether to write, given the current document and the new section.
pub fn plan_write(document: Option<&str>, section: &ChangelogSection) -> WriteDecision {
    match existing(document) {
        Some(doc) if contains_release(doc, &section.pair.next.tag) => WriteDecision::AlreadyPresent,
        Some(_) if section.is_empty() => WriteDecision::NothingToAdd,
        _ => WriteDecision::Write,
    }
}

/// Insert `fragment` directly below the title line.
///
/// Creates a titled document when `document` is absent or blank.
///
/// # Example
///
/// ```
/// use changelog_forge::changelog::document::splice;
///
/// let doc = "# Changelog\n\n## [v1.0](u1) (2024-01-01)\n";
/// let out = splice(Some(doc), "## [v2.0](u2) (2024-03-01)");
/// assert_eq!(
///     out,
///     "# Changelog\n\n## [v2.0](u2) (2024-03-01)\n\n## [v1.0](u1) (2024-01-01)\n"
/// );
/// ```
pub fn splice(document: Option<&str>, fragment: &str) -> String {
    let new_document = format!("{}\n", TITLE);
    let document = existing(document).unwrap_or(new_document.as_str());

    let mut lines: Vec<&str> = document.split('\n').collect();
    lines.insert(1, fragment);
    lines.insert(1, "");
    lines.join("\n")
}

/// Whether the document already has a section headed by `tag`.
pub fn contains_release(document: &str, tag: &str) -> bool {
    let prefix = format!("## [{}](", tag);
    document.lines().any(|line| line.starts_with(&prefix))
}

/// Read the document, returning `None` if it does not exist.
pub fn read_document(path: &Path) -> Result<Option<String>, ChangelogError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ChangelogError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replace the document with `contents`.
///
/// Writes a temp file next to the target and renames it over, so the
/// document is either the old or the new version, never a mix. The temp
/// file is removed again if any step fails.
pub fn write_document(path: &Path, contents: &str) -> Result<(), ChangelogError> {
    let write_err = |source| ChangelogError::WriteDocument {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_path = path.with_extension("md.tmp");
    let result = write_synced(&temp_path, contents).and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }

    Ok(())
}

fn write_synced(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn existing(document: Option<&str>) -> Option<&str> {
    document.filter(|d| !d.trim().is_empty())
}
