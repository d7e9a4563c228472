//! Block-level elements for document structure
//!
//! A [`Block`] is one top-level unit of a parsed markdown document. Blocks are
//! produced once by the parser and consumed once by a renderer.

use serde::{Deserialize, Serialize};

/// Table rows: row 0 is the header row, each row is an ordered list of cell texts
pub type TableRows = Vec<Vec<String>>;

/// Block-level content element
///
/// Text carried by paragraphs, list items and quotes keeps its emphasis
/// markers (`***`, `**`, `*`, backticks) so that a renderer can segment it
/// into styled spans. Heading and table cell text is plain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A section heading (level 1-6)
    Heading {
        /// Heading level, 1 is the highest
        level: u8,
        /// Plain heading text
        text: String,
    },
    /// A paragraph of text
    Paragraph(String),
    /// A bulleted list, one entry per item
    UnorderedList(Vec<String>),
    /// A numbered list, one entry per item
    OrderedList(Vec<String>),
    /// A table
    Table(TableRows),
    /// A literal/code block
    CodeBlock(String),
    /// A block quote
    Quote(String),
    /// A horizontal rule
    Rule,
    /// A parsed node with no rendering rule (raw HTML, footnotes, ...)
    Other(String),
}

impl Block {
    /// Short name of the block type, used in logs and statistics
    pub fn kind(&self) -> &str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::UnorderedList(_) => "unordered_list",
            Block::OrderedList(_) => "ordered_list",
            Block::Table(_) => "table",
            Block::CodeBlock(_) => "code_block",
            Block::Quote(_) => "quote",
            Block::Rule => "rule",
            Block::Other(kind) => kind,
        }
    }

    /// Create a heading block
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a paragraph block
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }
}
