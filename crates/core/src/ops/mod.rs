//! File-level frontmatter operations.
//!
//! Every operation reopens the file: read, parse, optionally modify and write
//! the whole file back. No state is kept between calls.

pub mod error;
pub mod extractor;
pub mod updater;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::frontmatter::{self, Document};

pub use error::{OpError, OpErrorKind, Operation};
pub use extractor::{Extractor, extract};
pub use updater::Updater;

/// Resolve `path` against the current directory without touching the file system.
pub(crate) fn resolve_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

pub(crate) fn load(op: Operation, path: &Path) -> Result<Document, OpError> {
    let content = fs::read_to_string(path)
        .map_err(|e| OpError::new(op, path, OpErrorKind::NotFound(e)))?;
    let doc = frontmatter::parse(&content)
        .map_err(|e| OpError::new(op, path, OpErrorKind::Parse(e)))?;
    debug!(path = %path.display(), has_frontmatter = doc.has_metadata(), "loaded document");
    Ok(doc)
}

pub(crate) fn store(op: Operation, path: &Path, doc: &Document) -> Result<(), OpError> {
    fs::write(path, frontmatter::serialize(doc))
        .map_err(|e| OpError::new(op, path, OpErrorKind::Write(e)))?;
    debug!(path = %path.display(), "wrote document");
    Ok(())
}
