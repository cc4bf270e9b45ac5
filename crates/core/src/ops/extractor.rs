//! Read-only frontmatter queries.

use std::path::{Path, PathBuf};

use super::{OpError, Operation, load, resolve_path};
use crate::frontmatter::Metadata;

/// Reads the frontmatter of a single markdown file.
#[derive(Debug, Clone)]
pub struct Extractor {
    path: PathBuf,
}

impl Extractor {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: resolve_path(path.as_ref()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the frontmatter, optionally restricted to `fields`.
    ///
    /// `Ok(None)` means the document has no frontmatter block at all, while an
    /// empty mapping means the block exists but is empty. Requested fields
    /// that are not present are left out of the result. An empty `fields`
    /// slice is the same as no projection.
    pub fn extract<S: AsRef<str>>(
        &self,
        fields: Option<&[S]>,
    ) -> Result<Option<Metadata>, OpError> {
        let doc = load(Operation::Extract, &self.path)?;
        let Some(metadata) = doc.metadata() else {
            return Ok(None);
        };

        Ok(Some(match fields {
            Some(fields) if !fields.is_empty() => metadata.project(fields),
            _ => metadata.clone(),
        }))
    }
}

/// Convenience wrapper around [`Extractor::extract`].
pub fn extract<S: AsRef<str>>(
    path: impl AsRef<Path>,
    fields: Option<&[S]>,
) -> Result<Option<Metadata>, OpError> {
    Extractor::new(path).extract(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Value;
    use crate::ops::OpErrorKind;
    use std::fs;
    use tempfile::tempdir;

    const NO_FIELDS: Option<&[&str]> = None;

    #[test]
    fn extract_full_and_projected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("note.md");
        fs::write(&path, "---\ntitle: T\nauthor: A\ndate: D\n---\nBody\n").unwrap();

        let full = extract(&path, NO_FIELDS).unwrap().unwrap();
        assert_eq!(full.len(), 3);

        let projected = extract(&path, Some(&["title", "author", "missing"][..])).unwrap().unwrap();
        let expected: Metadata = [("title", "T"), ("author", "A")].into_iter().collect();
        assert_eq!(projected, expected);
        assert!(projected.get("missing").is_none());
    }

    #[test]
    fn extract_without_frontmatter_is_none() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("plain.md");
        fs::write(&path, "# Just content\n").unwrap();

        assert_eq!(extract(&path, NO_FIELDS).unwrap(), None);
    }

    #[test]
    fn extract_empty_block_is_empty_mapping() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("empty.md");
        fs::write(&path, "---\n---\nBody\n").unwrap();

        assert_eq!(extract(&path, NO_FIELDS).unwrap(), Some(Metadata::new()));
    }

    #[test]
    fn extract_never_modifies_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("note.md");
        let original = "---\ntitle:    spaced\n---\n\nBody\n";
        fs::write(&path, original).unwrap();

        let fm = extract(&path, NO_FIELDS).unwrap().unwrap();
        assert_eq!(fm.get("title"), Some(&Value::from("spaced")));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nope.md");

        let err = extract(&path, NO_FIELDS).unwrap_err();
        assert!(matches!(err.kind(), OpErrorKind::NotFound(_)));
        assert_eq!(err.op(), Operation::Extract);
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("nope.md"));
    }

    #[test]
    fn malformed_yaml_is_an_error_not_none() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("bad.md");
        fs::write(&path, "---\ntitle: [oops\n---\nBody\n").unwrap();

        let err = extract(&path, NO_FIELDS).unwrap_err();
        assert!(matches!(err.kind(), OpErrorKind::Parse(_)));
    }
}
