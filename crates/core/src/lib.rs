//! Structured read/write access to YAML frontmatter in markdown documents,
//! plus AI-assisted tag generation built on top of it.

pub mod config;
pub mod frontmatter;
pub mod ops;
pub mod tagging;

pub use frontmatter::{Document, Metadata, Value};
pub use ops::{Extractor, OpError, OpErrorKind, Operation, Updater, extract};
