//! Minimal file-name globbing: `*` and `?` in the last path component.
//!
//! The directory part of a pattern is taken literally and only that one
//! directory is listed. `**`, character classes and braces have no special
//! meaning.

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum GlobError {
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to list directory {dir}: {source}")]
    List {
        dir: String,
        #[source]
        source: walkdir::Error,
    },
}

/// Whether `pattern` contains a wildcard and should be expanded.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Translate a file-name pattern into an anchored regex.
pub fn pattern_to_regex(pattern: &str) -> Result<Regex, GlobError> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');

    Regex::new(&re).map_err(|source| GlobError::Pattern { pattern: pattern.to_string(), source })
}

/// List regular files in the pattern's directory whose names match, sorted
/// by file name.
pub fn list_files(pattern: &str) -> Result<Vec<PathBuf>, GlobError> {
    let path = Path::new(pattern);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name_pattern = path.file_name().and_then(|n| n.to_str()).unwrap_or(pattern);
    let re = pattern_to_regex(name_pattern)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry
            .map_err(|source| GlobError::List { dir: dir.display().to_string(), source })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|name| re.is_match(name)) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
