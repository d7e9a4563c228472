//! # govdoc-raci
//!
//! RACI matrix workbooks for govdoc: markdown RACI tables become a
//! multi-sheet Excel workbook with colour-coded responsibility cells.
//!
//! ## Features
//!
//! - **Classification**: free-text cell values mapped to R, A, C, I or R/A
//! - **Sheet mapping**: sections routed to worksheets by name fragments
//! - **Overview sheet**: title, RACI legend and role abbreviations
//!
//! ## Example
//!
//! ```rust
//! use govdoc_core::extract_sections;
//! use govdoc_raci::{RaciCode, WorkbookBuilder};
//!
//! let source = "## 5. Gate 0: Intake & Prioritization RACI\n\n| Activity | AILead |\n|---|---|\n| Triage | R, A |\n";
//! let sections = extract_sections(source);
//!
//! let built = WorkbookBuilder::new().build(&sections)?;
//! assert_eq!(built.summary.tables_written, 1);
//! assert_eq!(RaciCode::classify("R, A"), Some(RaciCode::ResponsibleAccountable));
//! # Ok::<(), govdoc_raci::RaciError>(())
//! ```

pub mod builder;
pub mod code;
pub mod error;
pub mod mapping;
pub mod reference;
pub mod theme;

// Re-exports
pub use builder::{BuildSummary, RaciWorkbook, WorkbookBuilder, DEFAULT_OVERVIEW_SHEET};
pub use code::RaciCode;
pub use error::{RaciError, Result};
pub use mapping::{SheetAssignment, SheetMapping, SheetSpec};
pub use reference::{legend_table, roles_table, DEFAULT_SUBTITLE, DEFAULT_TITLE};
pub use theme::WorkbookTheme;
