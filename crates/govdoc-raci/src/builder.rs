//! RACI workbook assembly
//!
//! The first sheet carries the title, the RACI legend and the role
//! abbreviations. Every mapped sheet then receives its sections: a section
//! title, each subsection that has tables with its title and tables, the
//! section-level tables, and a gap before the next section.
//!
//! Tables are written with a blue header row, a free-text first column and
//! colour-coded RACI cells. Rows that are longer or shorter than the header
//! are written as they are.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use govdoc_core::{extract_sections_from_path, RaciTable, Section};
use govdoc_ooxml::{
    BorderStyle, CellStyle, HorizontalAlign, StyleId, VerticalAlign, Workbook, Worksheet,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::code::RaciCode;
use crate::error::{RaciError, Result};
use crate::mapping::SheetMapping;
use crate::reference::{
    legend_table, roles_table, DEFAULT_SUBTITLE, DEFAULT_TITLE, LEGEND_LABEL, ROLES_LABEL,
};
use crate::theme::WorkbookTheme;

/// Name of the sheet holding the title and reference tables
pub const DEFAULT_OVERVIEW_SHEET: &str = "Overview";

/// Last column of the merged title and subtitle rows
const TITLE_LAST_COLUMN: u32 = 6;

/// Row where the first overview reference table label goes
const OVERVIEW_FIRST_LABEL_ROW: u32 = 4;

/// What went into a workbook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Worksheets created, overview included
    pub sheets: usize,
    /// Sections found in the source
    pub sections_found: usize,
    /// Sections written to a mapped sheet
    pub sections_written: usize,
    /// Matrix tables written, reference tables excluded
    pub tables_written: usize,
}

impl BuildSummary {
    /// Sections no sheet claimed
    pub fn sections_unmapped(&self) -> usize {
        self.sections_found - self.sections_written
    }
}

/// A built workbook with its summary
#[derive(Debug, Clone)]
pub struct RaciWorkbook {
    pub workbook: Workbook,
    pub summary: BuildSummary,
}

/// Cell styles registered once per workbook
struct Styles {
    header: StyleId,
    text: StyleId,
    uncoded: StyleId,
    coded: HashMap<RaciCode, StyleId>,
    title: StyleId,
    subtitle: StyleId,
    label: StyleId,
    section: StyleId,
    subsection: StyleId,
}

impl Styles {
    fn register(workbook: &mut Workbook, theme: &WorkbookTheme) -> Self {
        let font = |size: u32| {
            let mut style = CellStyle::default().size(size);
            style.font.name = theme.font_name.clone();
            style
        };
        let border = BorderStyle {
            color: theme.border_color.clone(),
        };

        let header = font(theme.header_size)
            .bold()
            .color(&theme.contrast_color)
            .fill(&theme.header_fill)
            .bordered(border.clone())
            .align(HorizontalAlign::Center, VerticalAlign::Center)
            .wrap();
        let text = font(theme.text_size)
            .bordered(border.clone())
            .align(HorizontalAlign::Left, VerticalAlign::Center)
            .wrap();
        let uncoded = font(theme.code_size)
            .bold()
            .color(&theme.contrast_color)
            .bordered(border)
            .align(HorizontalAlign::Center, VerticalAlign::Center);

        let coded = RaciCode::ALL
            .into_iter()
            .map(|code| {
                let style = uncoded.clone().fill(theme.fill_for(code));
                (code, workbook.add_style(&style))
            })
            .collect();

        Self {
            header: workbook.add_style(&header),
            text: workbook.add_style(&text),
            uncoded: workbook.add_style(&uncoded),
            coded,
            title: workbook.add_style(
                &font(theme.title_size)
                    .bold()
                    .color(&theme.title_color),
            ),
            subtitle: workbook.add_style(&font(theme.subtitle_size).color(&theme.title_color)),
            label: workbook.add_style(&font(theme.label_size).bold()),
            section: workbook.add_style(
                &font(theme.section_size)
                    .bold()
                    .color(&theme.section_color),
            ),
            subsection: workbook.add_style(
                &font(theme.subsection_size)
                    .bold()
                    .color(&theme.subsection_color),
            ),
        }
    }

    fn for_value(&self, value: &str) -> StyleId {
        RaciCode::classify(value)
            .and_then(|code| self.coded.get(&code).copied())
            .unwrap_or(self.uncoded)
    }
}

/// Writes tables onto one worksheet
struct SheetWriter<'a> {
    sheet: &'a mut Worksheet,
    styles: &'a Styles,
    theme: &'a WorkbookTheme,
}

impl SheetWriter<'_> {
    /// Write one table at `start_row` and return the next free row
    fn write_table(&mut self, table: &RaciTable, start_row: u32) -> u32 {
        let Some(header) = table.header() else {
            return start_row;
        };

        for (col, value) in (1u32..).zip(header) {
            self.sheet.set_cell(start_row, col, value.as_str(), self.styles.header);
        }

        for (row, cells) in (start_row + 1..).zip(table.data_rows()) {
            for (col, value) in (1u32..).zip(cells) {
                let style = if col == 1 {
                    self.styles.text
                } else {
                    self.styles.for_value(value)
                };
                self.sheet.set_cell(row, col, value.as_str(), style);
            }
        }

        for col in 1..=header.len() as u32 {
            let width = if col == 1 {
                self.theme.first_column_width
            } else {
                self.theme.column_width
            };
            self.sheet.set_column_width(col, width);
        }

        let rows = table.len() as u32;
        self.sheet
            .set_row_height(start_row, self.theme.header_row_height);
        for row in start_row + 1..start_row + rows {
            self.sheet.set_row_height(row, self.theme.data_row_height);
        }

        start_row + rows + self.theme.table_gap
    }

    /// Write a section and return the next free row and the number of tables written
    fn write_section(&mut self, section: &Section, start_row: u32) -> (u32, usize) {
        let mut row = start_row;
        let mut tables = 0;

        self.sheet
            .set_cell(row, 1, section.name.as_str(), self.styles.section);
        row += 2;

        for subsection in section.subsections.iter().filter(|s| !s.tables.is_empty()) {
            self.sheet
                .set_cell(row, 1, subsection.name.as_str(), self.styles.subsection);
            row += 1;
            for table in &subsection.tables {
                row = self.write_table(table, row);
                tables += 1;
            }
        }

        for table in &section.tables {
            row = self.write_table(table, row);
            tables += 1;
        }

        (row + self.theme.section_gap, tables)
    }

    /// Write a labelled reference table; returns the row for the next label
    fn write_reference(&mut self, label: &str, table: &RaciTable, label_row: u32) -> u32 {
        self.sheet.set_cell(label_row, 1, label, self.styles.label);
        self.write_table(table, label_row + 1) - 1
    }
}

/// Builds RACI workbooks from extracted sections
#[derive(Debug, Clone)]
pub struct WorkbookBuilder {
    theme: WorkbookTheme,
    mapping: SheetMapping,
    title: String,
    subtitle: String,
    legend_sheet: String,
    roles_sheet: String,
}

impl Default for WorkbookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookBuilder {
    /// Builder with the default theme, mapping and overview content
    pub fn new() -> Self {
        Self {
            theme: WorkbookTheme::default(),
            mapping: SheetMapping::default(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            legend_sheet: DEFAULT_OVERVIEW_SHEET.to_string(),
            roles_sheet: DEFAULT_OVERVIEW_SHEET.to_string(),
        }
    }

    pub fn with_theme(mut self, theme: WorkbookTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_mapping(mut self, mapping: SheetMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self
    }

    /// Place the legend and the role table
    ///
    /// The legend sheet is created first and also carries the title. The
    /// role table goes on the legend sheet or on one of the mapped sheets.
    pub fn with_reference_sheets(
        mut self,
        legend_sheet: impl Into<String>,
        roles_sheet: impl Into<String>,
    ) -> Self {
        self.legend_sheet = legend_sheet.into();
        self.roles_sheet = roles_sheet.into();
        self
    }

    pub fn mapping(&self) -> &SheetMapping {
        &self.mapping
    }

    /// Build a workbook from extracted sections
    pub fn build(&self, sections: &[Section]) -> Result<RaciWorkbook> {
        let roles_on_overview = self.roles_sheet.eq_ignore_ascii_case(&self.legend_sheet);
        if !roles_on_overview
            && !self
                .mapping
                .sheets()
                .iter()
                .any(|s| s.name.eq_ignore_ascii_case(&self.roles_sheet))
        {
            return Err(RaciError::UnknownReferenceSheet(self.roles_sheet.clone()));
        }

        let mut workbook = Workbook::new();
        let styles = Styles::register(&mut workbook, &self.theme);
        let mut summary = BuildSummary {
            sections_found: sections.len(),
            ..BuildSummary::default()
        };

        let sheet = workbook.add_sheet(&self.legend_sheet)?;
        let mut overview = SheetWriter {
            sheet,
            styles: &styles,
            theme: &self.theme,
        };
        self.write_title(&mut overview);
        let next_label = overview.write_reference(LEGEND_LABEL, &legend_table(), OVERVIEW_FIRST_LABEL_ROW);
        if roles_on_overview {
            overview.write_reference(ROLES_LABEL, &roles_table(), next_label);
        }

        for assignment in self.mapping.assign(sections) {
            let sheet = workbook.add_sheet(assignment.sheet)?;
            let mut writer = SheetWriter {
                sheet,
                styles: &styles,
                theme: &self.theme,
            };
            let mut row = 1;
            for section in &assignment.sections {
                let (next, tables) = writer.write_section(section, row);
                row = next;
                summary.tables_written += tables;
            }
            summary.sections_written += assignment.sections.len();
            debug!(
                sheet = assignment.sheet,
                sections = assignment.sections.len(),
                "Filled worksheet"
            );
        }

        if !roles_on_overview {
            let sheet = workbook
                .sheet_mut(&self.roles_sheet)
                .ok_or_else(|| RaciError::UnknownReferenceSheet(self.roles_sheet.clone()))?;
            let label_row = if sheet.is_empty() {
                1
            } else {
                sheet.last_row() + 2
            };
            SheetWriter {
                sheet,
                styles: &styles,
                theme: &self.theme,
            }
            .write_reference(ROLES_LABEL, &roles_table(), label_row);
        }

        summary.sheets = workbook.sheets().len();
        info!(
            sheets = summary.sheets,
            sections = summary.sections_written,
            unmapped = summary.sections_unmapped(),
            tables = summary.tables_written,
            "Built RACI workbook"
        );

        Ok(RaciWorkbook { workbook, summary })
    }

    /// Read a RACI markdown file, build the workbook and save it
    ///
    /// The output directory is created if missing.
    pub fn convert(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<BuildSummary> {
        let sections = extract_sections_from_path(input)?;
        let built = self.build(&sections)?;

        let output = output.as_ref();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(govdoc_ooxml::OoxmlError::from)?;
        }
        built.workbook.save(output)?;
        Ok(built.summary)
    }

    fn write_title(&self, writer: &mut SheetWriter<'_>) {
        writer
            .sheet
            .set_cell(1, 1, self.title.as_str(), writer.styles.title);
        writer.sheet.merge(1, 1, 1, TITLE_LAST_COLUMN);
        writer
            .sheet
            .set_cell(2, 1, self.subtitle.as_str(), writer.styles.subtitle);
        writer.sheet.merge(2, 1, 2, TITLE_LAST_COLUMN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdoc_core::extract_sections;

    const SOURCE: &str = "\
## 4. Strategic & Operational Governance RACI

| Activity | SteerCom | AILead |
|---|---|---|
| Approve strategy | A | C |

### 4.1 Portfolio

| Activity | BizSpon |
|---|---|
| Fund initiative | R, A |

## 19. Escalation Matrix

| Level | Owner |
|---|---|
| 1 | AILead |
";

    fn overview_cell(built: &RaciWorkbook, row: u32, col: u32) -> Option<String> {
        built
            .workbook
            .sheet(DEFAULT_OVERVIEW_SHEET)
            .and_then(|s| s.cell(row, col))
            .map(|c| c.value.clone())
    }

    #[test]
    fn test_overview_layout() {
        let built = WorkbookBuilder::new().build(&[]).unwrap();
        assert_eq!(overview_cell(&built, 1, 1).as_deref(), Some(DEFAULT_TITLE));
        assert_eq!(overview_cell(&built, 2, 1).as_deref(), Some(DEFAULT_SUBTITLE));
        assert_eq!(overview_cell(&built, 4, 1).as_deref(), Some("RACI Legend"));
        assert_eq!(overview_cell(&built, 5, 1).as_deref(), Some("Code"));
        assert_eq!(overview_cell(&built, 10, 1).as_deref(), Some("R/A"));
        assert_eq!(overview_cell(&built, 12, 1).as_deref(), Some("Role Abbreviations"));
        assert_eq!(overview_cell(&built, 13, 1).as_deref(), Some("Abbreviation"));
        assert_eq!(overview_cell(&built, 33, 1).as_deref(), Some("SteerCom"));

        let overview = built.workbook.sheet(DEFAULT_OVERVIEW_SHEET).unwrap();
        assert_eq!(overview.merged_ranges(), vec!["A1:F1", "A2:F2"]);
    }

    #[test]
    fn test_every_mapped_sheet_created_in_order() {
        let built = WorkbookBuilder::new().build(&[]).unwrap();
        let names = built.workbook.sheet_names();
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], "Overview");
        assert_eq!(names[1], "2. Governance");
        assert_eq!(names[13], "14. Appendices");
        assert_eq!(built.summary.sheets, 14);
    }

    #[test]
    fn test_section_layout() {
        let sections = extract_sections(SOURCE);
        let built = WorkbookBuilder::new().build(&sections).unwrap();
        let sheet = built.workbook.sheet("2. Governance").unwrap();
        let value = |row, col| sheet.cell(row, col).map(|c| c.value.as_str());

        // Title, blank, subsection title, subsection table, two blank rows,
        // then the section-level table
        assert_eq!(value(1, 1), Some("4. Strategic & Operational Governance RACI"));
        assert_eq!(value(3, 1), Some("4.1 Portfolio"));
        assert_eq!(value(4, 1), Some("Activity"));
        assert_eq!(value(5, 2), Some("R, A"));
        assert_eq!(value(8, 2), Some("SteerCom"));
        assert_eq!(value(9, 1), Some("Approve strategy"));

        assert_eq!(sheet.row_height(4), Some(30.0));
        assert_eq!(sheet.row_height(5), Some(25.0));
        assert_eq!(sheet.column_width(1), Some(50.0));
        assert_eq!(sheet.column_width(3), Some(15.0));

        assert_eq!(built.summary.sections_found, 2);
        assert_eq!(built.summary.sections_written, 1);
        assert_eq!(built.summary.sections_unmapped(), 1);
        assert_eq!(built.summary.tables_written, 2);
    }

    #[test]
    fn test_raci_cells_styled_by_code() {
        let sections = extract_sections(SOURCE);
        let built = WorkbookBuilder::new().build(&sections).unwrap();
        let sheet = built.workbook.sheet("2. Governance").unwrap();

        let ra = sheet.cell(5, 2).unwrap().style;
        let a = sheet.cell(9, 2).unwrap().style;
        let c = sheet.cell(9, 3).unwrap().style;
        let activity = sheet.cell(9, 1).unwrap().style;
        assert_ne!(ra, a);
        assert_ne!(a, c);
        assert_ne!(activity, a);

        // Same code, same style
        let mut workbook = Workbook::new();
        let styles = Styles::register(&mut workbook, &WorkbookTheme::default());
        assert_eq!(styles.for_value("R/A"), styles.for_value("a, r"));
        assert_eq!(styles.for_value("-"), styles.uncoded);
    }

    #[test]
    fn test_roles_on_mapped_sheet() {
        let sections = extract_sections(SOURCE);
        let built = WorkbookBuilder::new()
            .with_reference_sheets(DEFAULT_OVERVIEW_SHEET, "14. Appendices")
            .build(&sections)
            .unwrap();

        assert_eq!(overview_cell(&built, 12, 1), None);
        let appendix = built.workbook.sheet("14. Appendices").unwrap();
        assert_eq!(
            appendix.cell(1, 1).map(|c| c.value.as_str()),
            Some("Role Abbreviations")
        );
        assert_eq!(appendix.cell(2, 1).map(|c| c.value.as_str()), Some("Abbreviation"));
    }

    #[test]
    fn test_unknown_roles_sheet() {
        let err = WorkbookBuilder::new()
            .with_reference_sheets(DEFAULT_OVERVIEW_SHEET, "Nowhere")
            .build(&[])
            .unwrap_err();
        assert!(matches!(err, RaciError::UnknownReferenceSheet(name) if name == "Nowhere"));
    }

    #[test]
    fn test_duplicate_mapped_sheet_rejected() {
        let mapping = SheetMapping::new(vec![
            crate::mapping::SheetSpec::new("Gates", &["Gate 0"]),
            crate::mapping::SheetSpec::new("gates", &["Gate 1"]),
        ]);
        let err = WorkbookBuilder::new()
            .with_mapping(mapping)
            .build(&[])
            .unwrap_err();
        assert!(matches!(err, RaciError::Workbook(_)));
    }

    #[test]
    fn test_custom_title() {
        let built = WorkbookBuilder::new()
            .with_title("RACI", "CoE")
            .build(&[])
            .unwrap();
        assert_eq!(overview_cell(&built, 1, 1).as_deref(), Some("RACI"));
        assert_eq!(overview_cell(&built, 2, 1).as_deref(), Some("CoE"));
    }
}
