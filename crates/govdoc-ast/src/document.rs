//! Document root
//!
//! The parsed form of one markdown file: an optional title and the ordered
//! sequence of top-level blocks.

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// A complete parsed document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document title (typically the source file stem)
    pub title: Option<String>,
    /// Top-level blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            blocks: Vec::new(),
        }
    }

    /// Add a block to the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document is empty (no blocks)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
