//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use govdoc_core::{extract_sections_from_path, located_tables, Section, TableLocation};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::batch::{convert_directory, BatchReport};
use crate::settings::{load_settings, DocxSettings, RaciSettings};

#[derive(Parser)]
#[command(name = "govdoc")]
#[command(author, version, about = "Governance markdown to Word and Excel", long_about = None)]
struct Cli {
    /// Configuration file (defaults to govdoc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every markdown file in a directory to a Word document
    Docx {
        /// Directory containing markdown files
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Directory receiving the .docx files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a RACI matrix markdown file to an Excel workbook
    Raci {
        /// RACI matrix markdown file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output .xlsx file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the sections and tables found in a markdown file as JSON
    Inspect {
        /// Markdown file
        input: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Docx { source, output } => {
            let mut docx = settings.docx;
            if let Some(source) = source {
                docx.source_dir = source;
            }
            if let Some(output) = output {
                docx.output_dir = output;
            }
            docx_command(&docx)?;
        }
        Commands::Raci { input, output } => {
            let mut raci = settings.raci;
            if let Some(input) = input {
                raci.input = input;
            }
            if let Some(output) = output {
                raci.output = output;
            }
            raci_command(&raci)?;
        }
        Commands::Inspect { input } => {
            inspect_command(&input)?;
        }
    }

    Ok(())
}

/// Execute the docx command
///
/// Per-file failures are printed and counted, never returned.
pub fn docx_command(settings: &DocxSettings) -> Result<BatchReport> {
    println!("govdoc v{}", govdoc_core::VERSION);
    debug!(source = %settings.source_dir.display(), "Converting directory");

    let report = convert_directory(&settings.source_dir, &settings.output_dir, &settings.theme)?;
    info!(
        converted = report.converted.len(),
        failed = report.failures.len(),
        "Batch finished"
    );
    Ok(report)
}

/// Execute the raci command
///
/// Returns the written workbook path, or `None` when the source file is
/// missing. A missing source is reported on stdout and is not an error.
pub fn raci_command(settings: &RaciSettings) -> Result<Option<PathBuf>> {
    println!("Starting RACI to Excel conversion...");

    if !settings.input.exists() {
        println!("Error: Source file not found: {}", settings.input.display());
        return Ok(None);
    }
    println!("Reading from: {}", settings.input.display());

    let summary = settings
        .builder()
        .convert(&settings.input, &settings.output)
        .with_context(|| {
            format!(
                "Failed to build workbook: {}",
                settings.output.display()
            )
        })?;

    let size = fs::metadata(&settings.output)
        .with_context(|| format!("Failed to stat workbook: {}", settings.output.display()))?
        .len();

    println!();
    println!("✓ Excel workbook created: {}", settings.output.display());
    println!("  Sheets: {}", summary.sheets);
    println!(
        "  Sections: {} written, {} unmapped",
        summary.sections_written,
        summary.sections_unmapped()
    );
    println!("  File size: {:.1} KB", size as f64 / 1024.0);

    Ok(Some(settings.output.clone()))
}

/// A table listed by the inspect command
#[derive(Serialize)]
struct LocatedTable<'a> {
    #[serde(flatten)]
    location: TableLocation<'a>,
    rows: &'a [Vec<String>],
}

#[derive(Serialize)]
struct InspectReport<'a> {
    sections: &'a [Section],
    /// Every table in document order with the headings it sits under
    tables: Vec<LocatedTable<'a>>,
}

/// Render extracted sections as the inspect command's JSON report
pub fn inspect_json(sections: &[Section]) -> Result<String> {
    let tables = located_tables(sections)
        .into_iter()
        .map(|(location, table)| LocatedTable {
            location,
            rows: table.rows(),
        })
        .collect();
    let report = InspectReport { sections, tables };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Execute the inspect command
pub fn inspect_command(input: &Path) -> Result<()> {
    let sections = extract_sections_from_path(input)
        .with_context(|| format!("Failed to read markdown: {}", input.display()))?;
    println!("{}", inspect_json(&sections)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_docx_defaults() {
        let cli = Cli::try_parse_from(["govdoc", "docx"]).unwrap();
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Docx { source, output } => {
                assert!(source.is_none());
                assert!(output.is_none());
            }
            _ => panic!("Expected Docx command"),
        }
    }

    #[test]
    fn test_cli_parse_docx_dirs() {
        let cli =
            Cli::try_parse_from(["govdoc", "docx", "--source", "docs", "-o", "word"]).unwrap();
        match cli.command {
            Commands::Docx { source, output } => {
                assert_eq!(source, Some(PathBuf::from("docs")));
                assert_eq!(output, Some(PathBuf::from("word")));
            }
            _ => panic!("Expected Docx command"),
        }
    }

    #[test]
    fn test_cli_parse_raci_with_global_config() {
        let cli = Cli::try_parse_from([
            "govdoc",
            "raci",
            "--input",
            "RACI.md",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Raci { input, output } => {
                assert_eq!(input, Some(PathBuf::from("RACI.md")));
                assert!(output.is_none());
            }
            _ => panic!("Expected Raci command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::try_parse_from(["govdoc", "inspect", "RACI-Matrix.md"]).unwrap();
        match cli.command {
            Commands::Inspect { input } => {
                assert_eq!(input, PathBuf::from("RACI-Matrix.md"));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect_requires_file() {
        assert!(Cli::try_parse_from(["govdoc", "inspect"]).is_err());
    }

    #[test]
    fn test_raci_missing_source_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = RaciSettings {
            input: dir.path().join("absent.md"),
            output: dir.path().join("out.xlsx"),
            ..RaciSettings::default()
        };
        assert_eq!(raci_command(&settings).unwrap(), None);
        assert!(!settings.output.exists());
    }

    #[test]
    fn test_inspect_json_lists_located_tables() {
        let sections = govdoc_core::extract_sections(
            "## Gate 0\n### Intake\n| Activity | BA |\n|---|---|\n| Triage | R |\n",
        );
        let json: serde_json::Value = serde_json::from_str(&inspect_json(&sections).unwrap()).unwrap();

        assert_eq!(json["sections"][0]["name"], "Gate 0");
        let table = &json["tables"][0];
        assert_eq!(table["section"], "Gate 0");
        assert_eq!(table["subsection"], "Intake");
        assert_eq!(table["rows"][1][0], "Triage");
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(inspect_command(&dir.path().join("absent.md")).is_err());
    }
}
