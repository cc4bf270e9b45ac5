//! Document model: a markdown file as an ordered sequence of blocks.

use super::value::Metadata;

/// A top-level block of a markdown document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// The leading `---` fenced YAML block.
    Metadata(MetadataBlock),
    /// Raw markdown, including its trailing blank-line separator.
    Content(String),
}

/// Decoded frontmatter together with the exact source it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataBlock {
    fields: Metadata,
    /// Original text, fences included. Cleared on mutation.
    source: Option<String>,
}

impl MetadataBlock {
    /// A freshly built block, rendered canonically when serialized.
    pub fn new(fields: Metadata) -> Self {
        Self { fields, source: None }
    }

    pub(crate) fn parsed(fields: Metadata, source: String) -> Self {
        Self { fields, source: Some(source) }
    }

    pub fn fields(&self) -> &Metadata {
        &self.fields
    }

    /// Mutable access to the fields. Marks the block as modified.
    pub fn fields_mut(&mut self) -> &mut Metadata {
        self.source = None;
        &mut self.fields
    }

    pub fn set_fields(&mut self, fields: Metadata) {
        self.fields = fields;
        self.source = None;
    }

    /// Original source text if the block is untouched since parsing.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.source.is_none()
    }
}

/// A parsed markdown document.
///
/// At most one [`Block::Metadata`] exists and it is always the first block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn from_parts(metadata: Option<MetadataBlock>, content: Vec<String>) -> Self {
        let mut blocks = Vec::with_capacity(content.len() + 1);
        if let Some(block) = metadata {
            blocks.push(Block::Metadata(block));
        }
        blocks.extend(content.into_iter().map(Block::Content));
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn has_metadata(&self) -> bool {
        matches!(self.blocks.first(), Some(Block::Metadata(_)))
    }

    pub fn metadata_block(&self) -> Option<&MetadataBlock> {
        match self.blocks.first() {
            Some(Block::Metadata(block)) => Some(block),
            _ => None,
        }
    }

    pub fn metadata_block_mut(&mut self) -> Option<&mut MetadataBlock> {
        match self.blocks.first_mut() {
            Some(Block::Metadata(block)) => Some(block),
            _ => None,
        }
    }

    /// Decoded frontmatter, or `None` when the document has no metadata block.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata_block().map(MetadataBlock::fields)
    }

    /// Replace the frontmatter, inserting a metadata block at the start of
    /// the document if there is none.
    pub fn set_metadata(&mut self, fields: Metadata) {
        match self.metadata_block_mut() {
            Some(block) => block.set_fields(fields),
            None => self.blocks.insert(0, Block::Metadata(MetadataBlock::new(fields))),
        }
    }

    pub fn content_blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Content(text) => Some(text.as_str()),
            Block::Metadata(_) => None,
        })
    }

    /// Everything after the metadata block, verbatim.
    pub fn content(&self) -> String {
        self.content_blocks().collect()
    }
}
