//! Frontmatter serialization back to markdown.

use super::emitter::to_yaml;
use super::types::{Block, Document, MetadataBlock};
use super::value::Metadata;

/// Serialize a document back to markdown.
///
/// Untouched blocks are written out exactly as they were read; a modified or
/// newly created metadata block is rendered canonically.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        match block {
            Block::Metadata(meta) => out.push_str(&render_metadata_block(meta)),
            Block::Content(text) => out.push_str(text),
        }
    }
    out
}

fn render_metadata_block(block: &MetadataBlock) -> String {
    match block.source() {
        Some(source) => source.to_string(),
        None => frontmatter_block(block.fields()),
    }
}

/// Render fields as a fenced frontmatter block, closing fence newline included.
pub fn frontmatter_block(fields: &Metadata) -> String {
    format!("---\n{}---\n", to_yaml(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parser::parse;
    use crate::frontmatter::value::Value;

    #[test]
    fn serialize_document_without_frontmatter() {
        let doc = parse("# Hello\n\nWorld").unwrap();
        assert_eq!(serialize(&doc), "# Hello\n\nWorld");
    }

    #[test]
    fn untouched_document_roundtrips_exactly() {
        let original = "---\r\ntitle:   Hello   # spaced\ncount: 42\n---  \n\n# Body\n\n```\ncode\n\n```\n";
        let doc = parse(original).unwrap();
        assert!(!doc.metadata_block().unwrap().is_modified());
        assert_eq!(serialize(&doc), original);
    }

    #[test]
    fn modified_block_is_rendered_canonically() {
        let mut doc = parse("---\ntitle:   Old\n---\n\n# Body\n").unwrap();
        doc.metadata_block_mut().unwrap().fields_mut().insert("title", "New");
        assert!(doc.metadata_block().unwrap().is_modified());
        assert_eq!(serialize(&doc), "---\ntitle: New\n---\n\n# Body\n");
    }

    #[test]
    fn inserted_block_precedes_original_content() {
        let mut doc = parse("\n# No frontmatter\n").unwrap();
        let mut fields = Metadata::new();
        fields.insert("title", "New");
        doc.set_metadata(fields);
        assert_eq!(serialize(&doc), "---\ntitle: New\n---\n\n# No frontmatter\n");
    }

    #[test]
    fn empty_fields_render_bare_fences() {
        assert_eq!(frontmatter_block(&Metadata::new()), "---\n---\n");
    }

    #[test]
    fn roundtrip_frontmatter() {
        let original = "---\ntitle: Hello\ncount: 42\n---\n\n# Body";
        let mut doc = parse(original).unwrap();
        let fields = doc.metadata().cloned().unwrap();
        doc.set_metadata(fields.clone());

        let reparsed = parse(&serialize(&doc)).unwrap();
        assert_eq!(reparsed.metadata(), Some(&fields));
        assert_eq!(reparsed.metadata().unwrap().get("count").and_then(Value::as_i64), Some(42));
        assert_eq!(reparsed.content(), "\n# Body");
    }
}
