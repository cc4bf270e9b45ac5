//! AI-assisted tag generation layered over the frontmatter operations.

pub mod client;
pub mod glob;
pub mod orchestrator;
pub mod prompt;

pub use client::{ClientError, OpenAiClient, TagGenerator};
pub use glob::{GlobError, is_glob, list_files};
pub use orchestrator::{RunReport, TagError, TagOrchestrator};
pub use prompt::build_prompt;

/// Most tags written to a document.
pub const MAX_TAGS: usize = 3;
