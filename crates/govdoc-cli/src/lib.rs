//! govdoc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for govdoc:
//! - Docx: convert a directory of markdown files to Word documents
//! - Raci: convert a RACI matrix markdown file to an Excel workbook
//! - Inspect: print the sections and tables found in a markdown file
//!
//! # Library Usage
//!
//! ```ignore
//! use govdoc_cli::{convert_directory, Settings};
//!
//! let settings = Settings::default();
//! let report = convert_directory(&settings.docx.source_dir, &settings.docx.output_dir, &settings.docx.theme)?;
//! println!("{} converted", report.converted.len());
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert governance-docs/*.md into governance-docs-word/
//! govdoc docx
//!
//! # Build the RACI workbook from a custom file
//! govdoc raci --input RACI.md --output out/RACI.xlsx
//!
//! # Show extracted tables as JSON
//! govdoc inspect RACI-Matrix.md
//! ```

pub mod app;
pub mod batch;
pub mod settings;

// Re-export main entry point and types
pub use app::{docx_command, inspect_command, inspect_json, raci_command, run_cli};
pub use batch::{convert_directory, convert_file, markdown_files, BatchReport, FileFailure};
pub use settings::{load_settings, DocxSettings, RaciSettings, Settings, DEFAULT_CONFIG_FILE};
