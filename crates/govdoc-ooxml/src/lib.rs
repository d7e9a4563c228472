//! # govdoc-ooxml
//!
//! OOXML (Office Open XML) generation for govdoc.
//!
//! This crate provides functionality to:
//! - Render parsed markdown blocks as a Word document ([`DocxWriter`])
//! - Build styled multi-sheet Excel workbooks ([`Workbook`])
//! - Read generated packages back for inspection ([`OoxmlArchive`])
//!
//! ## Example: Writing a Document
//!
//! ```no_run
//! use govdoc_core::parse_markdown_file;
//! use govdoc_ooxml::DocxWriter;
//!
//! let doc = parse_markdown_file("governance-docs/Charter.md")?;
//! let stats = DocxWriter::new().write_to_file(&doc, "Charter.docx")?;
//! println!("{} tables", stats.tables);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod docx;
pub mod error;
pub mod package;
pub mod relationships;
pub mod theme;
pub mod xlsx;

pub use archive::OoxmlArchive;
pub use docx::{checkbox_label, DocxWriter, RenderStats, RenderedDocx};
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use theme::{DocxTheme, HeadingStyle};
pub use xlsx::{
    cell_ref, column_letter, Alignment, BorderStyle, CellStyle, Font, HorizontalAlign, StyleId,
    VerticalAlign, Workbook, Worksheet,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
