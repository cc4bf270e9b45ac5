//! Tag generation for a single file or a glob batch.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use super::client::{ClientError, TagGenerator};
use super::glob::{GlobError, is_glob, list_files};
use super::prompt::build_prompt;
use super::MAX_TAGS;
use crate::frontmatter::{Metadata, Value};
use crate::ops::{Extractor, OpError, OpErrorKind, Operation, Updater};

#[derive(Debug, Error)]
pub enum TagError {
    #[error(transparent)]
    Frontmatter(#[from] OpError),

    #[error("tag generation failed for {}: {source}", .path.display())]
    Client {
        path: PathBuf,
        #[source]
        source: ClientError,
    },

    #[error("AI returned no tags for {}", .path.display())]
    EmptyGeneration { path: PathBuf },

    #[error(transparent)]
    Glob(#[from] GlobError),
}

/// Outcome of a [`TagOrchestrator::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files that were tagged, with the tags written.
    pub tagged: Vec<(PathBuf, Vec<String>)>,
    /// Files that failed in batch mode, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

impl RunReport {
    /// No file matched (batch mode) or was processed.
    pub fn is_empty(&self) -> bool {
        self.tagged.is_empty() && self.failed.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Adds a `tags` field to one file, or to every file matching a pattern.
pub struct TagOrchestrator<G> {
    target: String,
    create_if_missing: bool,
    generator: G,
}

impl<G: TagGenerator> TagOrchestrator<G> {
    /// `target` is a file path or a pattern using `*` / `?`.
    pub fn new(target: impl Into<String>, generator: G) -> Self {
        Self { target: target.into(), create_if_missing: false, generator }
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn is_batch(&self) -> bool {
        is_glob(&self.target)
    }

    /// Process the target.
    ///
    /// A single file's error is returned. In batch mode files are handled in
    /// order and a failing file is logged and recorded in the report while
    /// the rest are still processed.
    pub fn run(&self) -> Result<RunReport, TagError> {
        let mut report = RunReport::default();

        if !self.is_batch() {
            let path = PathBuf::from(&self.target);
            let tags = self.process_file(&path)?;
            report.tagged.push((path, tags));
            return Ok(report);
        }

        let files = list_files(&self.target)?;
        if files.is_empty() {
            warn!(pattern = %self.target, "no files matched");
            return Ok(report);
        }
        info!(pattern = %self.target, count = files.len(), "tagging matched files");

        for path in files {
            match self.process_file(&path) {
                Ok(tags) => report.tagged.push((path, tags)),
                Err(e) => {
                    error!(path = %path.display(), error = %e, "failed to tag file");
                    report.failed.push((path, e.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// Generate and write tags for one file, returning the tags written.
    pub fn process_file(&self, path: &Path) -> Result<Vec<String>, TagError> {
        let extractor = Extractor::new(path);
        let current = extractor.extract::<&str>(None)?;

        if current.is_none() && !self.create_if_missing {
            return Err(OpError::new(
                Operation::UpdateFrontmatter,
                extractor.path(),
                OpErrorKind::NoFrontmatter,
            )
            .into());
        }

        let prompt = build_prompt(current.as_ref());
        let generated = self
            .generator
            .generate(&prompt)
            .map_err(|source| TagError::Client { path: path.to_path_buf(), source })?;

        let tags = normalize_tags(generated);
        if tags.is_empty() {
            return Err(TagError::EmptyGeneration { path: path.to_path_buf() });
        }

        let mut fields = Metadata::new();
        fields.insert("tags", Value::from(tags.clone()));

        let updater = Updater::new(path).create_if_missing(self.create_if_missing);
        match current {
            Some(_) => updater.update_fields(fields)?,
            None => updater.update_frontmatter(fields)?,
        }

        info!(path = %path.display(), tags = ?tags, "tags written");
        Ok(tags)
    }
}

/// Trim tags, drop blank ones and keep at most [`MAX_TAGS`].
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .take(MAX_TAGS)
        .collect()
}
