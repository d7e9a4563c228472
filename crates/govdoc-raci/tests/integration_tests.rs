//! Integration tests for govdoc-raci
//!
//! Convert a RACI markdown file to disk and read the workbook back with
//! calamine.

use std::fs;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use govdoc_ooxml::OoxmlArchive;
use govdoc_raci::{RaciError, WorkbookBuilder, DEFAULT_OVERVIEW_SHEET};

const RACI_MATRIX: &str = r#"# RACI Matrix

## 1. Introduction

Roles are listed on the overview sheet.

## 5. Gate 0: Intake & Prioritization RACI

### 5.1 Idea Submission

| Activity | BizSpon | AILead | SteerCom |
|----------|:-------:|:------:|:--------:|
| Submit idea | R | I | - |
| Prioritize backlog | A | R/A | C |

## 11. Post-Implementation Review RACI

| Activity | BizOwn |
|---|---|
| Benefits review | R, A |

## 12. Ongoing Operations & Maintenance RACI

| Activity | ItOps |
|---|---|
| Monitor | R |
"#;

fn write_source(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("RACI-Matrix.md");
    fs::write(&path, RACI_MATRIX).unwrap();
    path
}

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[test]
fn test_convert_writes_readable_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let output = dir.path().join("word").join("RACI-Matrix.xlsx");

    let summary = WorkbookBuilder::new().convert(&input, &output).unwrap();
    assert_eq!(summary.sections_found, 4);
    assert_eq!(summary.sections_written, 3);
    assert_eq!(summary.tables_written, 3);

    let mut workbook: Xlsx<_> = open_workbook(&output).unwrap();
    let names = workbook.sheet_names();
    assert_eq!(names.len(), 14);
    assert_eq!(names[0], DEFAULT_OVERVIEW_SHEET);

    let overview = workbook.worksheet_range(DEFAULT_OVERVIEW_SHEET).unwrap();
    assert_eq!(cell(&overview, 3, 0).as_deref(), Some("RACI Legend"));
    assert_eq!(cell(&overview, 11, 0).as_deref(), Some("Role Abbreviations"));

    let intake = workbook.worksheet_range("3. Gate 0 - Intake").unwrap();
    assert_eq!(
        cell(&intake, 0, 0).as_deref(),
        Some("5. Gate 0: Intake & Prioritization RACI")
    );
    assert_eq!(cell(&intake, 2, 0).as_deref(), Some("5.1 Idea Submission"));
    assert_eq!(cell(&intake, 3, 3).as_deref(), Some("SteerCom"));
    assert_eq!(cell(&intake, 5, 2).as_deref(), Some("R/A"));

    // Two sections share one sheet, in mapping order
    let ops = workbook.worksheet_range("9. Post-Impl & Ops").unwrap();
    assert_eq!(
        cell(&ops, 0, 0).as_deref(),
        Some("11. Post-Implementation Review RACI")
    );
    // title, gap, table (2 rows), 2 blank rows, 2 section gap rows
    assert_eq!(
        cell(&ops, 8, 0).as_deref(),
        Some("12. Ongoing Operations & Maintenance RACI")
    );
}

#[test]
fn test_fills_in_styles_part() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path());
    let output = dir.path().join("RACI-Matrix.xlsx");
    WorkbookBuilder::new().convert(&input, &output).unwrap();

    let archive = OoxmlArchive::open(&output).unwrap();
    let styles = archive.get_string("xl/styles.xml").unwrap();
    for fill in ["4472C4", "ED7D31", "FFC000", "A5A5A5", "C65911", "2F5496"] {
        assert!(
            styles.contains(&format!("<fgColor rgb=\"FF{}\"/>", fill)),
            "missing fill {}",
            fill
        );
    }
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let err = WorkbookBuilder::new()
        .convert(dir.path().join("absent.md"), dir.path().join("out.xlsx"))
        .unwrap_err();
    assert!(matches!(err, RaciError::Source(_)));
    assert!(!dir.path().join("out.xlsx").exists());
}
