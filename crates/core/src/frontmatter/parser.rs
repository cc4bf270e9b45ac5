//! Frontmatter parsing from markdown documents.

use super::types::{Document, MetadataBlock};
use super::value::{Metadata, Value};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {source}")]
    InvalidYaml {
        /// The offending YAML text.
        raw: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("frontmatter must be a mapping, found {found}")]
    NotAMapping { raw: String, found: &'static str },
}

impl FrontmatterParseError {
    /// The YAML text that failed to decode.
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidYaml { raw, .. } | Self::NotAMapping { raw, .. } => raw,
        }
    }
}

/// Parse a markdown document into blocks.
///
/// Frontmatter is delimited by `---` lines at the very start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// An opening fence without a matching closing fence is not frontmatter.
pub fn parse(content: &str) -> Result<Document, FrontmatterParseError> {
    match split_frontmatter(content) {
        Some(split) => {
            let fields = decode_yaml(split.yaml)?;
            let block = MetadataBlock::parsed(fields, split.block.to_string());
            Ok(Document::from_parts(Some(block), split_blocks(split.body)))
        }
        None => Ok(Document::from_parts(None, split_blocks(content))),
    }
}

/// Decode YAML frontmatter text into a mapping.
///
/// Blank or comment-only text decodes to an empty mapping.
pub fn decode_yaml(yaml: &str) -> Result<Metadata, FrontmatterParseError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|source| {
        FrontmatterParseError::InvalidYaml { raw: yaml.to_string(), source }
    })?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Metadata::new()),
        other => Err(FrontmatterParseError::NotAMapping {
            raw: yaml.to_string(),
            found: other.type_name(),
        }),
    }
}

struct Split<'a> {
    /// Fences plus YAML.
    block: &'a str,
    /// Text between the fences.
    yaml: &'a str,
    /// Everything after the closing fence line.
    body: &'a str,
}

fn split_frontmatter(content: &str) -> Option<Split<'_>> {
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next()?;
    if !opening.ends_with('\n') || !is_fence(opening) {
        return None;
    }

    let yaml_start = opening.len();
    let mut pos = yaml_start;
    for line in lines {
        if is_fence(line) {
            let block_end = pos + line.len();
            return Some(Split {
                block: &content[..block_end],
                yaml: &content[yaml_start..pos],
                body: &content[block_end..],
            });
        }
        pos += line.len();
    }

    None
}

/// A `---` line, tolerating trailing whitespace and CRLF endings.
fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r', ' ', '\t']) == "---"
}

/// Split markdown into top-level blocks at blank lines.
///
/// Each block keeps its trailing blank lines so that concatenating the blocks
/// reproduces the input. Blank lines inside fenced code never split.
pub(crate) fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut code_fence: Option<(char, usize)> = None;
    let mut pending_break = false;

    for line in content.split_inclusive('\n') {
        if let Some((marker, len)) = code_fence {
            current.push_str(line);
            if closes_code_fence(line, marker, len) {
                code_fence = None;
            }
            continue;
        }

        if line.trim().is_empty() {
            current.push_str(line);
            pending_break = current.trim() != "";
            continue;
        }

        if pending_break {
            blocks.push(std::mem::take(&mut current));
            pending_break = false;
        }
        current.push_str(line);
        code_fence = opens_code_fence(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn opens_code_fence(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some((marker, len))
}

fn closes_code_fence(line: &str, marker: char, len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= len && trimmed.chars().all(|c| c == marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "# Hello\n\nSome content";
        let doc = parse(content).unwrap();
        assert!(doc.metadata().is_none());
        assert_eq!(doc.content(), content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let content = "---\ntitle: Hello\n---\n# Content";
        let doc = parse(content).unwrap();
        let fm = doc.metadata().unwrap();
        assert_eq!(fm.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(doc.content(), "# Content");
    }

    #[test]
    fn parse_frontmatter_with_multiple_fields() {
        let content =
            "---\ntitle: Test\ndate: 2024-01-15\ntags:\n  - rust\n  - cli\n---\n\nBody";
        let doc = parse(content).unwrap();
        let fm = doc.metadata().unwrap();
        assert_eq!(fm.get("title").and_then(|v| v.as_str()), Some("Test"));
        assert_eq!(fm.get("date").and_then(|v| v.as_str()), Some("2024-01-15"));
        assert_eq!(fm.get("tags").and_then(|v| v.as_sequence()).map(<[_]>::len), Some(2));
        assert_eq!(doc.content(), "\nBody");
    }

    #[test]
    fn parse_empty_frontmatter_is_empty_mapping() {
        let doc = parse("---\n---\n# Content").unwrap();
        assert!(doc.metadata().unwrap().is_empty());
        assert_eq!(doc.content(), "# Content");
    }

    #[test]
    fn comment_only_frontmatter_is_empty_mapping() {
        let doc = parse("---\n# just a comment\n---\nbody\n").unwrap();
        assert!(doc.metadata().unwrap().is_empty());
    }

    #[test]
    fn unclosed_fence_is_not_frontmatter() {
        let content = "---\ntitle: Hello\n# Content\n";
        let doc = parse(content).unwrap();
        assert!(!doc.has_metadata());
        assert_eq!(doc.content(), content);
    }

    #[test]
    fn fence_must_be_first_line() {
        let content = "\n---\ntitle: Hello\n---\nbody";
        let doc = parse(content).unwrap();
        assert!(!doc.has_metadata());
    }

    #[test]
    fn crlf_fences_are_recognised() {
        let content = "---\r\ntitle: Hello\r\n---\r\nbody\r\n";
        let doc = parse(content).unwrap();
        assert_eq!(doc.metadata().unwrap().get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(doc.content(), "body\r\n");
    }

    #[test]
    fn malformed_yaml_carries_raw_text() {
        let err = parse("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterParseError::InvalidYaml { .. }));
        assert_eq!(err.raw(), "title: [unclosed\n");
    }

    #[test]
    fn scalar_frontmatter_is_rejected() {
        let err = parse("---\njust text\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontmatterParseError::NotAMapping { found: "string", .. }));
    }

    #[test]
    fn split_blocks_is_lossless() {
        let content = "\n# Title\n\nPara one\nstill one\n\n\n- item\n- item\n";
        let blocks = split_blocks(content);
        assert_eq!(blocks, ["\n# Title\n\n", "Para one\nstill one\n\n\n", "- item\n- item\n"]);
        assert_eq!(blocks.concat(), content);
    }

    #[test]
    fn split_blocks_keeps_code_fences_whole() {
        let content = "Intro\n\n```rust\nfn a() {}\n\nfn b() {}\n```\n\nAfter\n";
        let blocks = split_blocks(content);
        assert_eq!(blocks, ["Intro\n\n", "```rust\nfn a() {}\n\nfn b() {}\n```\n\n", "After\n"]);
    }
}
