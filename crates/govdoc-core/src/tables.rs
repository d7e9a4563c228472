//! Section-aware table extraction
//!
//! Scans markdown source line by line, groups pipe-prefixed lines into
//! tables, and files each table under the most recent `## ` section and,
//! when present, `### ` subsection heading.
//!
//! The scanner is a two-state machine:
//!
//! | State      | Input                     | Next state |
//! |------------|---------------------------|------------|
//! | `Scanning` | line starting with `\|`   | `InTable`  |
//! | `InTable`  | separator row             | `InTable` (row discarded) |
//! | `InTable`  | any other `\|` line       | `InTable` (row kept) |
//! | `InTable`  | non-pipe line / end       | `Scanning` (table closed) |
//!
//! Tables closed before any section heading are dropped.
//!
//! # Example
//!
//! ```
//! use govdoc_core::extract_sections;
//!
//! let source = "## 5. Gate 0\n\n| Activity | BA |\n|---|---|\n| Intake | R |\n";
//! let sections = extract_sections(source);
//! assert_eq!(sections[0].name, "5. Gate 0");
//! assert_eq!(sections[0].tables[0].len(), 2);
//! ```

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

/// A markdown table: row 0 is the header row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaciTable {
    rows: Vec<Vec<String>>,
}

impl RaciTable {
    /// Create a table from rows, header first
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The header row
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Number of columns in the header row
    pub fn width(&self) -> usize {
        self.header().map_or(0, |h| h.len())
    }

    /// Number of rows including the header
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indices of data rows whose cell count differs from the header
    pub fn mismatched_rows(&self) -> Vec<usize> {
        let width = self.width();
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, row)| row.len() != width)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Tables found under a `### ` heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// Heading text
    pub name: String,
    /// Tables in document order
    pub tables: Vec<RaciTable>,
}

/// Tables found under a `## ` heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub name: String,
    /// Tables directly under the section, before any subsection
    pub tables: Vec<RaciTable>,
    /// Subsections in document order
    pub subsections: Vec<Subsection>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Total number of tables in the section and its subsections
    pub fn table_count(&self) -> usize {
        self.tables.len()
            + self
                .subsections
                .iter()
                .map(|s| s.tables.len())
                .sum::<usize>()
    }
}

/// Where a table was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableLocation<'a> {
    /// Section heading text
    pub section: &'a str,
    /// Subsection heading text, if the table sat under one
    pub subsection: Option<&'a str>,
}

/// Scanner state
#[derive(Debug, Clone, PartialEq)]
enum ScanState {
    /// Outside any table
    Scanning,
    /// Accumulating rows of the current table
    InTable(Vec<Vec<String>>),
}

/// Line scanner that buckets tables by heading
#[derive(Debug)]
pub struct TableExtractor {
    sections: Vec<Section>,
    /// Index of the open subsection within the last section
    subsection: Option<usize>,
    state: ScanState,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor {
    /// Create an extractor in the `Scanning` state
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            subsection: None,
            state: ScanState::Scanning,
        }
    }

    /// Feed one source line
    pub fn process_line(&mut self, line: &str) {
        let line = line.trim_end();

        if line.starts_with('|') {
            let row = (!is_separator_row(line)).then(|| parse_table_row(line));
            match &mut self.state {
                ScanState::InTable(rows) => rows.extend(row),
                ScanState::Scanning => {
                    self.state = ScanState::InTable(row.into_iter().collect());
                }
            }
            return;
        }

        self.close_table();

        if let Some(name) = line.strip_prefix("## ") {
            let name = name.trim();
            if self.sections.iter().any(|s| s.name == name) {
                warn!(section = name, "repeated section heading, keeping both");
            }
            self.sections.push(Section::new(name));
            self.subsection = None;
        } else if let Some(name) = line.strip_prefix("### ") {
            if let Some(section) = self.sections.last_mut() {
                section.subsections.push(Subsection {
                    name: name.trim().to_string(),
                    tables: Vec::new(),
                });
                self.subsection = Some(section.subsections.len() - 1);
            }
        }
    }

    /// Close any open table and return the sections
    pub fn finish(mut self) -> Vec<Section> {
        self.close_table();
        self.sections
    }

    /// `InTable` → `Scanning`: file the accumulated rows under the current heading
    fn close_table(&mut self) {
        let rows = match std::mem::replace(&mut self.state, ScanState::Scanning) {
            ScanState::Scanning => return,
            ScanState::InTable(rows) => rows,
        };
        if rows.is_empty() {
            return;
        }

        let table = RaciTable::new(rows);
        let Some(section) = self.sections.last_mut() else {
            debug!(rows = table.len(), "dropping table outside any section");
            return;
        };

        for idx in table.mismatched_rows() {
            warn!(
                section = %section.name,
                row = idx,
                expected = table.width(),
                found = table.rows()[idx].len(),
                "table row length differs from header"
            );
        }

        match self.subsection.and_then(|i| section.subsections.get_mut(i)) {
            Some(subsection) => subsection.tables.push(table),
            None => section.tables.push(table),
        }
    }
}

/// Extract all sections and their tables from markdown source
pub fn extract_sections(source: &str) -> Vec<Section> {
    let mut extractor = TableExtractor::new();
    for line in source.split('\n') {
        extractor.process_line(line);
    }
    extractor.finish()
}

/// Read a markdown file and extract its sections
pub fn extract_sections_from_path(path: impl AsRef<Path>) -> Result<Vec<Section>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.display().to_string()));
    }
    let source = fs::read_to_string(path)?;
    Ok(extract_sections(&source))
}

/// Every table with its location, in section order
///
/// Within a section, subsection tables come first, then section-level tables.
pub fn located_tables(sections: &[Section]) -> Vec<(TableLocation<'_>, &RaciTable)> {
    let mut out = Vec::new();
    for section in sections {
        for subsection in &section.subsections {
            for table in &subsection.tables {
                let location = TableLocation {
                    section: &section.name,
                    subsection: Some(&subsection.name),
                };
                out.push((location, table));
            }
        }
        for table in &section.tables {
            let location = TableLocation {
                section: &section.name,
                subsection: None,
            };
            out.push((location, table));
        }
    }
    out
}

/// Whether a line is the header/body divider (`|---|:--:|`)
pub fn is_separator_row(line: &str) -> bool {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR
        .get_or_init(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("separator pattern is valid"))
        .is_match(line.trim_end())
}

/// Split a pipe-delimited line into trimmed cells
///
/// The empty fields produced by the outer pipes are removed; inner empty
/// cells are kept.
pub fn parse_table_row(line: &str) -> Vec<String> {
    let mut fields: Vec<&str> = line.trim().split('|').collect();
    if fields.first().is_some_and(|f| f.trim().is_empty()) {
        fields.remove(0);
    }
    if fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }
    fields.into_iter().map(|f| f.trim().to_string()).collect()
}
