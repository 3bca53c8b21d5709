use serde::{Deserialize, Serialize};

use crate::document::node::Node;

/// An ordered group of nodes under an optional title
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// Block title, empty if untitled
    pub title: String,
    /// Nodes in document order
    pub nodes: Vec<Node>,
}

impl Block {
    /// Create an untitled block
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            title: String::new(),
            nodes,
        }
    }

    /// Create a titled block
    pub fn with_title(title: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            nodes,
        }
    }

    /// First node of the block, if any
    pub fn first_node(&self) -> Option<NodeRef<'_>> {
        NodeRef::at(self, 0)
    }

    /// Walk the nodes through their `next` links
    pub fn linked_nodes(&self) -> LinkedNodes<'_> {
        LinkedNodes {
            current: self.first_node(),
        }
    }
}

/// View of a node inside its owning block.
///
/// The owning block is a borrow, so the back-reference can never outlive or
/// disagree with the block that stores the node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    block: &'a Block,
    position: usize,
}

impl<'a> NodeRef<'a> {
    fn at(block: &'a Block, position: usize) -> Option<Self> {
        (position < block.nodes.len()).then_some(Self { block, position })
    }

    /// The referenced node
    pub fn node(&self) -> &'a Node {
        &self.block.nodes[self.position]
    }

    /// Block owning this node
    pub fn block(&self) -> &'a Block {
        self.block
    }

    /// Index of the node within its block
    pub fn position(&self) -> usize {
        self.position
    }

    /// Following node in the same block
    pub fn next(&self) -> Option<NodeRef<'a>> {
        NodeRef::at(self.block, self.position + 1)
    }
}

/// Iterator following `NodeRef::next`
pub struct LinkedNodes<'a> {
    current: Option<NodeRef<'a>>,
}

impl<'a> Iterator for LinkedNodes<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        self.current = current.next();
        Some(current)
    }
}
