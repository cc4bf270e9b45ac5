//! Errors for file-level frontmatter operations.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frontmatter::FrontmatterParseError;

/// The file-level operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Extract,
    UpdateFrontmatter,
    UpdateFields,
    RemoveFields,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Extract => "extract frontmatter",
            Operation::UpdateFrontmatter => "update frontmatter",
            Operation::UpdateFields => "update fields",
            Operation::RemoveFields => "remove fields",
        })
    }
}

#[derive(Debug, Error)]
pub enum OpErrorKind {
    #[error("cannot read file: {0}")]
    NotFound(#[source] std::io::Error),

    #[error("{0}")]
    Parse(#[source] FrontmatterParseError),

    #[error("no frontmatter found (use --create to add one)")]
    NoFrontmatter,

    #[error("cannot write file: {0}")]
    Write(#[source] std::io::Error),
}

/// A failed operation on a markdown file, naming the operation and the path.
#[derive(Debug, Error)]
#[error("failed to {op} in {}: {kind}", .path.display())]
pub struct OpError {
    op: Operation,
    path: PathBuf,
    #[source]
    kind: OpErrorKind,
}

impl OpError {
    pub(crate) fn new(op: Operation, path: &Path, kind: OpErrorKind) -> Self {
        Self { op, path: path.to_path_buf(), kind }
    }

    pub fn op(&self) -> Operation {
        self.op
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &OpErrorKind {
        &self.kind
    }

    pub fn is_no_frontmatter(&self) -> bool {
        matches!(self.kind, OpErrorKind::NoFrontmatter)
    }
}
