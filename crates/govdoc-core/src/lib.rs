//! govdoc-core - Markdown in, structure out
//!
//! Core library for govdoc, providing:
//! - [`parse_markdown`]: markdown text to typed top-level blocks
//! - [`format_inline`]: block text to emphasis-styled spans
//! - [`extract_sections`]: section-aware extraction of pipe tables
//!
//! # Example
//!
//! ```
//! use govdoc_ast::Block;
//! use govdoc_core::{extract_sections, parse_markdown};
//!
//! let source = "## 4. Governance RACI\n\n| Activity | SteerCom |\n|---|---|\n| Approve | A |\n";
//!
//! let doc = parse_markdown(source);
//! assert!(matches!(doc.blocks[1], Block::Table(_)));
//!
//! let sections = extract_sections(source);
//! assert_eq!(sections[0].tables[0].data_rows()[0][1], "A");
//! ```

pub mod error;
pub mod inline;
pub mod markdown;
pub mod tables;

// Re-export main types and functions
pub use error::{CoreError, Result};
pub use inline::{format_inline, EmphasisRule, InlineFormatter, EMPHASIS_RULES};
pub use markdown::{parse_markdown, parse_markdown_file};
pub use tables::{
    extract_sections, extract_sections_from_path, is_separator_row, located_tables,
    parse_table_row, RaciTable, Section, Subsection, TableExtractor, TableLocation,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
