//! Batch markdown to Word conversion
//!
//! Every `*.md` file directly inside the source directory becomes
//! `<stem>.docx` in the output directory. A failing file is reported and
//! skipped; the rest of the batch still runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use govdoc_core::parse_markdown_file;
use govdoc_ooxml::{DocxTheme, DocxWriter};
use serde::Serialize;
use tracing::{debug, warn};

/// A file the batch could not convert
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Written documents, in conversion order
    pub converted: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of markdown files the batch looked at
    pub fn total(&self) -> usize {
        self.converted.len() + self.failures.len()
    }
}

/// Markdown files directly inside `dir`, sorted by path
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.md", Pattern::escape(&dir.display().to_string()));

    let mut files = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Could not read {}", e),
        }
    }
    files.sort();
    Ok(files)
}

/// Convert one markdown file into `<stem>.docx` inside `output_dir`
pub fn convert_file(input: &Path, output_dir: &Path, theme: &DocxTheme) -> Result<PathBuf> {
    let doc = parse_markdown_file(input)
        .with_context(|| format!("Failed to read markdown: {}", input.display()))?;

    let stem = input
        .file_stem()
        .with_context(|| format!("No file name: {}", input.display()))?;
    let output = output_dir.join(format!("{}.docx", stem.to_string_lossy()));

    let stats = DocxWriter::with_theme(theme.clone())
        .write_to_file(&doc, &output)
        .with_context(|| format!("Failed to write document: {}", output.display()))?;
    debug!(input = %input.display(), ?stats, "Converted");

    Ok(output)
}

/// Final path component for progress lines
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Convert every markdown file in `source_dir`, printing progress
///
/// The output directory is created if missing. Only failures outside the
/// per-file loop (the output directory, the glob) are returned as errors.
pub fn convert_directory(
    source_dir: &Path,
    output_dir: &Path,
    theme: &DocxTheme,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    if !source_dir.is_dir() {
        warn!(dir = %source_dir.display(), "Source directory not found");
    }
    let files = markdown_files(source_dir)?;

    println!("Found {} markdown files to convert", files.len());
    println!("{}", "-".repeat(50));

    let mut report = BatchReport::default();
    for input in files {
        println!("Converting: {}", file_name(&input));

        match convert_file(&input, output_dir, theme) {
            Ok(output) => {
                println!("  ✓ Created: {}", file_name(&output));
                report.converted.push(output);
            }
            Err(e) => {
                println!("  ✗ Error: {:#}", e);
                warn!(input = %input.display(), "Conversion failed: {:#}", e);
                report.failures.push(FileFailure {
                    input,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    println!("{}", "-".repeat(50));
    println!("Conversion complete!");
    println!("Output directory: {}", output_dir.display());

    Ok(report)
}
