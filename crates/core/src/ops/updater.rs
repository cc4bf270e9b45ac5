//! Read-modify-write frontmatter updates.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{OpError, OpErrorKind, Operation, load, resolve_path, store};
use crate::frontmatter::{
    EditOutcome, FrontmatterEdit, FrontmatterModifyError, Metadata, apply_edit,
};

/// Rewrites the frontmatter of a single markdown file.
///
/// When the file has no frontmatter, writes fail with
/// [`OpErrorKind::NoFrontmatter`] unless `create_if_missing` is set, in which
/// case a new block is inserted ahead of the unchanged content.
#[derive(Debug, Clone)]
pub struct Updater {
    path: PathBuf,
    create_if_missing: bool,
}

impl Updater {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: resolve_path(path.as_ref()), create_if_missing: false }
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole frontmatter with `fields`.
    pub fn update_frontmatter(&self, fields: Metadata) -> Result<(), OpError> {
        self.apply(Operation::UpdateFrontmatter, FrontmatterEdit::Replace(fields))
    }

    /// Merge `fields` over the existing frontmatter.
    pub fn update_fields(&self, fields: Metadata) -> Result<(), OpError> {
        self.apply(Operation::UpdateFields, FrontmatterEdit::Merge(fields))
    }

    /// Delete `keys` from the frontmatter. A file without frontmatter is left
    /// untouched.
    pub fn remove_fields<S: AsRef<str>>(&self, keys: &[S]) -> Result<(), OpError> {
        let keys = keys.iter().map(|k| k.as_ref().to_string()).collect();
        self.apply(Operation::RemoveFields, FrontmatterEdit::Remove(keys))
    }

    /// The full frontmatter, or `None` if the file has none. Never writes.
    pub fn current_frontmatter(&self) -> Result<Option<Metadata>, OpError> {
        let doc = load(Operation::Extract, &self.path)?;
        Ok(doc.metadata().cloned())
    }

    fn apply(&self, op: Operation, edit: FrontmatterEdit) -> Result<(), OpError> {
        let mut doc = load(op, &self.path)?;

        match apply_edit(&mut doc, edit, self.create_if_missing) {
            Ok(EditOutcome::Changed) => store(op, &self.path, &doc),
            Ok(EditOutcome::Unchanged) => {
                debug!(path = %self.path.display(), "no frontmatter to edit, leaving file as is");
                Ok(())
            }
            Err(FrontmatterModifyError::MissingFrontmatter) => {
                Err(OpError::new(op, &self.path, OpErrorKind::NoFrontmatter))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Value;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn note(content: &str) -> (TempDir, PathBuf) {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("note.md");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn update_fields_merges() {
        let (_tmp, path) = note("---\ntitle: X\ndraft: true\ntags:\n  - a\n---\nBody\n");
        let partial: Metadata = [("draft", false)].into_iter().collect();

        Updater::new(&path).update_fields(partial).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\ntitle: X\ndraft: false\ntags:\n  - a\n---\nBody\n"
        );
    }

    #[test]
    fn update_frontmatter_without_block_fails_and_leaves_file() {
        let original = "# Heading\n\nText\n";
        let (_tmp, path) = note(original);
        let fields: Metadata = [("title", "New")].into_iter().collect();

        let err = Updater::new(&path).update_frontmatter(fields).unwrap_err();
        assert!(err.is_no_frontmatter());
        assert_eq!(err.op(), Operation::UpdateFrontmatter);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn update_frontmatter_creates_when_asked() {
        let (_tmp, path) = note("# Heading\n\nText\n");
        let fields: Metadata = [("title", "New")].into_iter().collect();

        Updater::new(&path).create_if_missing(true).update_frontmatter(fields).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\ntitle: New\n---\n# Heading\n\nText\n"
        );
    }

    #[test]
    fn remove_fields_without_block_does_not_write() {
        let original = "plain";
        let (_tmp, path) = note(original);
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        Updater::new(&path).remove_fields(&["title"]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn current_frontmatter_reads_only() {
        let original = "---\ncount:   3\n---\n";
        let (_tmp, path) = note(original);

        let fm = Updater::new(&path).current_frontmatter().unwrap().unwrap();
        assert_eq!(fm.get("count"), Some(&Value::Integer(3)));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
