//! Frontmatter parsing, modification, and serialization.
//!
//! This module provides functionality to:
//! - Parse a markdown document into a leading frontmatter block and content blocks
//! - Modify frontmatter fields (replace, merge, remove)
//! - Serialize documents back to markdown, leaving content bytes untouched

pub mod emitter;
pub mod modifier;
pub mod parser;
pub mod serializer;
pub mod types;
pub mod value;

pub use emitter::to_yaml;
pub use modifier::{EditOutcome, FrontmatterEdit, FrontmatterModifyError, apply_edit};
pub use parser::{FrontmatterParseError, decode_yaml, parse};
pub use serializer::{frontmatter_block, serialize};
pub use types::{Block, Document, MetadataBlock};
pub use value::{Metadata, Value};
