pub mod block;
pub mod error;
pub mod node;

use serde::{Deserialize, Serialize};

pub use block::{Block, LinkedNodes, NodeRef};
pub use error::ConvertError;
pub use node::{Node, PRE_RENDERED_LANGUAGE};

/// Parsed representation of one source file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Title of the root section
    pub title: String,
    /// Blocks in document order
    pub blocks: Vec<Block>,
    /// File the document was read from, for diagnostics only
    pub source_path: String,
}

impl Document {
    /// Create a document without blocks
    pub fn new(title: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
            source_path: source_path.into(),
        }
    }

    /// First block of the document, if any
    pub fn first_block(&self) -> Option<BlockRef<'_>> {
        BlockRef::at(self, 0)
    }

    /// Walk the blocks through their `next` links
    pub fn linked_blocks(&self) -> LinkedBlocks<'_> {
        LinkedBlocks {
            current: self.first_block(),
        }
    }

    /// Total number of nodes across all blocks
    pub fn node_count(&self) -> usize {
        self.blocks.iter().map(|block| block.nodes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.blocks.is_empty()
    }
}

/// View of a block inside its document
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    document: &'a Document,
    position: usize,
}

impl<'a> BlockRef<'a> {
    fn at(document: &'a Document, position: usize) -> Option<Self> {
        (position < document.blocks.len()).then_some(Self { document, position })
    }

    /// The referenced block
    pub fn block(&self) -> &'a Block {
        &self.document.blocks[self.position]
    }

    /// Index of the block within the document
    pub fn position(&self) -> usize {
        self.position
    }

    /// Following block in the document
    pub fn next(&self) -> Option<BlockRef<'a>> {
        BlockRef::at(self.document, self.position + 1)
    }

    /// First node of the referenced block
    pub fn first_node(&self) -> Option<NodeRef<'a>> {
        self.block().first_node()
    }
}

/// Iterator following `BlockRef::next`
pub struct LinkedBlocks<'a> {
    current: Option<BlockRef<'a>>,
}

impl<'a> Iterator for LinkedBlocks<'a> {
    type Item = BlockRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        self.current = current.next();
        Some(current)
    }
}
