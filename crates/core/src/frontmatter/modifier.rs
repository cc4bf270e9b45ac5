//! Frontmatter modification operations.

use super::types::Document;
use super::value::Metadata;
use thiserror::Error;

/// Errors that can occur during frontmatter modification.
#[derive(Debug, Error)]
pub enum FrontmatterModifyError {
    #[error("document has no frontmatter and creating one was not requested")]
    MissingFrontmatter,
}

/// An edit to a document's frontmatter.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterEdit {
    /// Replace every field with the given mapping.
    Replace(Metadata),
    /// Shallow-merge the given fields over the existing ones.
    Merge(Metadata),
    /// Delete the named fields. Missing fields are ignored.
    Remove(Vec<String>),
}

/// What [`apply_edit`] did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Frontmatter was rewritten and the document should be saved.
    Changed,
    /// Nothing to do; the document should not be written.
    Unchanged,
}

/// Apply an edit to a document.
///
/// With no frontmatter present, `Replace` and `Merge` create a block at the
/// start of the document only when `create_if_missing` is set, and `Remove`
/// leaves the document alone.
pub fn apply_edit(
    doc: &mut Document,
    edit: FrontmatterEdit,
    create_if_missing: bool,
) -> Result<EditOutcome, FrontmatterModifyError> {
    if !doc.has_metadata() {
        if matches!(edit, FrontmatterEdit::Remove(_)) {
            return Ok(EditOutcome::Unchanged);
        }
        if !create_if_missing {
            return Err(FrontmatterModifyError::MissingFrontmatter);
        }
    }

    let fields = match edit {
        FrontmatterEdit::Replace(fields) => fields,
        FrontmatterEdit::Merge(partial) => {
            let mut merged = doc.metadata().cloned().unwrap_or_default();
            merge_fields(&mut merged, partial);
            merged
        }
        FrontmatterEdit::Remove(keys) => {
            let mut reduced = doc.metadata().cloned().unwrap_or_default();
            remove_fields(&mut reduced, &keys);
            reduced
        }
    };
    doc.set_metadata(fields);
    Ok(EditOutcome::Changed)
}

/// Overlay `partial` on `fields`: new keys are appended, existing keys take
/// the new value in place, everything else is kept.
pub fn merge_fields(fields: &mut Metadata, partial: Metadata) {
    for (key, value) in partial {
        fields.insert(key, value);
    }
}

/// Delete `keys` from `fields`, returning how many were present.
pub fn remove_fields<S: AsRef<str>>(fields: &mut Metadata, keys: &[S]) -> usize {
    keys.iter().filter(|k| fields.remove(k.as_ref()).is_some()).count()
}
