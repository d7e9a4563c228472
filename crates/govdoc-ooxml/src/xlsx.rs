//! XLSX Writer
//!
//! A small SpreadsheetML writer: string cells, cell styles (font, solid fill,
//! thin borders, alignment), column widths, row heights and merged ranges.
//! Workbooks are assembled in memory and written in one pass through
//! [`OoxmlArchive`].
//!
//! Rows and columns are 1-based, as in the spreadsheet UI.
//!
//! # Example
//!
//! ```
//! use govdoc_ooxml::xlsx::{CellStyle, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let bold = workbook.add_style(&CellStyle::default().bold());
//! let sheet = workbook.add_sheet("Summary").unwrap();
//! sheet.set_cell(1, 1, "Activity", bold);
//! sheet.set_column_width(1, 50.0);
//!
//! let bytes = workbook.to_bytes().unwrap();
//! assert!(!bytes.is_empty());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use quick_xml::escape::escape;
use tracing::debug;

use crate::archive::OoxmlArchive;
use crate::error::{OoxmlError, Result};
use crate::package::{write_package_parts, ContentTypes};
use crate::relationships::Relationships;

/// Main workbook part
pub const WORKBOOK_PART: &str = "xl/workbook.xml";
/// Styles part
pub const XLSX_STYLES_PART: &str = "xl/styles.xml";

const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_XLSX_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Longest sheet name Excel accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;
/// Characters Excel rejects in sheet names
pub const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Font of a cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub name: String,
    /// Size in points
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
    /// RGB hex colour without `#`
    pub color: Option<String>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11,
            bold: false,
            italic: false,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    fn as_str(self) -> &'static str {
        match self {
            HorizontalAlign::General => "general",
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top,
    Center,
    #[default]
    Bottom,
}

impl VerticalAlign {
    fn as_str(self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

/// Cell alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub wrap: bool,
}

/// Complete formatting of a cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub font: Font,
    /// Solid fill colour, RGB hex without `#`
    pub fill: Option<String>,
    /// Thin border on all four sides
    pub border: Option<BorderStyle>,
    pub alignment: Alignment,
}

/// Thin border on all four sides in one colour
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorderStyle {
    /// RGB hex colour without `#`
    pub color: String,
}

impl BorderStyle {
    /// Thin black border
    pub fn thin_black() -> Self {
        Self {
            color: "000000".to_string(),
        }
    }
}

impl CellStyle {
    pub fn bold(mut self) -> Self {
        self.font.bold = true;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.font.size = size;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.font.color = Some(color.into());
        self
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn bordered(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn align(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.alignment.horizontal = horizontal;
        self.alignment.vertical = vertical;
        self
    }

    pub fn wrap(mut self) -> Self {
        self.alignment.wrap = true;
        self
    }
}

/// Index of a registered cell style (`s` attribute)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleId(u32);

impl StyleId {
    /// The workbook's default style
    pub const DEFAULT: StyleId = StyleId(0);

    pub fn index(self) -> u32 {
        self.0
    }
}

/// A written cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: String,
    pub style: StyleId,
}

/// One worksheet
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    merges: Vec<(u32, u32, u32, u32)>,
}

impl Worksheet {
    fn new(name: String) -> Self {
        Self {
            name,
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            merges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write a string cell, replacing any previous value
    pub fn set_cell(&mut self, row: u32, col: u32, value: impl Into<String>, style: StyleId) {
        self.cells.insert(
            (row, col),
            Cell {
                value: value.into(),
                style,
            },
        );
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Merge a rectangular range
    pub fn merge(&mut self, first_row: u32, first_col: u32, last_row: u32, last_col: u32) {
        self.merges.push((first_row, first_col, last_row, last_col));
    }

    /// Merged ranges in A1 notation
    pub fn merged_ranges(&self) -> Vec<String> {
        self.merges
            .iter()
            .map(|&(r1, c1, r2, c2)| format!("{}:{}", cell_ref(r1, c1), cell_ref(r2, c2)))
            .collect()
    }

    /// Highest row holding a cell, 0 for an empty sheet
    pub fn last_row(&self) -> u32 {
        self.cells.keys().map(|&(row, _)| row).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            "<worksheet xmlns=\"{}\" xmlns:r=\"{}\">\n",
            MAIN_NS, REL_NS
        ));

        if let Some((&first, &last)) = self
            .cells
            .keys()
            .min()
            .zip(self.cells.keys().max())
        {
            let max_col = self.cells.keys().map(|&(_, c)| c).max().unwrap_or(first.1);
            let min_col = self.cells.keys().map(|&(_, c)| c).min().unwrap_or(first.1);
            xml.push_str(&format!(
                "<dimension ref=\"{}:{}\"/>\n",
                cell_ref(first.0, min_col),
                cell_ref(last.0, max_col)
            ));
        }

        if !self.column_widths.is_empty() {
            xml.push_str("<cols>\n");
            for (col, width) in &self.column_widths {
                xml.push_str(&format!(
                    "<col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>\n",
                    col, width
                ));
            }
            xml.push_str("</cols>\n");
        }

        xml.push_str("<sheetData>\n");
        let rows: BTreeSet<u32> = self
            .cells
            .keys()
            .map(|&(row, _)| row)
            .chain(self.row_heights.keys().copied())
            .collect();
        for row in rows {
            match self.row_heights.get(&row) {
                Some(height) => xml.push_str(&format!(
                    "<row r=\"{}\" ht=\"{}\" customHeight=\"1\">\n",
                    row, height
                )),
                None => xml.push_str(&format!("<row r=\"{}\">\n", row)),
            }
            for ((_, col), cell) in self.cells.range((row, 0)..=(row, u32::MAX)) {
                xml.push_str(&format!(
                    "<c r=\"{}\" s=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>\n",
                    cell_ref(row, *col),
                    cell.style.index(),
                    escape(cell.value.as_str())
                ));
            }
            xml.push_str("</row>\n");
        }
        xml.push_str("</sheetData>\n");

        if !self.merges.is_empty() {
            xml.push_str(&format!("<mergeCells count=\"{}\">\n", self.merges.len()));
            for range in self.merged_ranges() {
                xml.push_str(&format!("<mergeCell ref=\"{}\"/>\n", range));
            }
            xml.push_str("</mergeCells>\n");
        }

        xml.push_str("</worksheet>");
        xml
    }
}

/// One `cellXfs` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Xf {
    font: usize,
    fill: usize,
    border: usize,
    alignment: Alignment,
}

/// Deduplicated style components, in the order they are serialized
#[derive(Debug, Clone)]
struct StyleTable {
    fonts: Vec<Font>,
    /// Index 0 is `none`, index 1 the mandatory `gray125`
    fills: Vec<Option<String>>,
    borders: Vec<Option<BorderStyle>>,
    xfs: Vec<Xf>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            fonts: vec![Font::default()],
            fills: vec![None, None],
            borders: vec![None],
            xfs: vec![Xf {
                font: 0,
                fill: 0,
                border: 0,
                alignment: Alignment::default(),
            }],
        }
    }
}

fn index_of<T: PartialEq>(items: &mut Vec<T>, item: T, skip: usize) -> usize {
    match items.iter().skip(skip).position(|existing| *existing == item) {
        Some(pos) => pos + skip,
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}

impl StyleTable {
    fn register(&mut self, style: &CellStyle) -> StyleId {
        let font = index_of(&mut self.fonts, style.font.clone(), 0);
        let fill = match &style.fill {
            Some(color) => index_of(&mut self.fills, Some(color.to_uppercase()), 2),
            None => 0,
        };
        let border = index_of(&mut self.borders, style.border.clone(), 0);
        let xf = Xf {
            font,
            fill,
            border,
            alignment: style.alignment,
        };
        StyleId(index_of(&mut self.xfs, xf, 0) as u32)
    }

    fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!("<styleSheet xmlns=\"{}\">\n", MAIN_NS));

        xml.push_str(&format!("<fonts count=\"{}\">\n", self.fonts.len()));
        for font in &self.fonts {
            xml.push_str("<font>");
            if font.bold {
                xml.push_str("<b/>");
            }
            if font.italic {
                xml.push_str("<i/>");
            }
            xml.push_str(&format!("<sz val=\"{}\"/>", font.size));
            if let Some(color) = &font.color {
                xml.push_str(&format!("<color rgb=\"{}\"/>", argb(color)));
            }
            xml.push_str(&format!(
                "<name val=\"{}\"/><family val=\"2\"/></font>\n",
                escape(font.name.as_str())
            ));
        }
        xml.push_str("</fonts>\n");

        xml.push_str(&format!("<fills count=\"{}\">\n", self.fills.len()));
        for (idx, fill) in self.fills.iter().enumerate() {
            match (idx, fill) {
                (0, _) => xml.push_str("<fill><patternFill patternType=\"none\"/></fill>\n"),
                (1, _) => xml.push_str("<fill><patternFill patternType=\"gray125\"/></fill>\n"),
                (_, Some(color)) => xml.push_str(&format!(
                    "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>\n",
                    argb(color)
                )),
                (_, None) => xml.push_str("<fill><patternFill patternType=\"none\"/></fill>\n"),
            }
        }
        xml.push_str("</fills>\n");

        xml.push_str(&format!("<borders count=\"{}\">\n", self.borders.len()));
        for border in &self.borders {
            match border {
                Some(border) => {
                    let color = argb(&border.color);
                    xml.push_str("<border>");
                    for side in ["left", "right", "top", "bottom"] {
                        xml.push_str(&format!(
                            "<{0} style=\"thin\"><color rgb=\"{1}\"/></{0}>",
                            side, color
                        ));
                    }
                    xml.push_str("<diagonal/></border>\n");
                }
                None => xml.push_str("<border><left/><right/><top/><bottom/><diagonal/></border>\n"),
            }
        }
        xml.push_str("</borders>\n");

        xml.push_str("<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\n");

        xml.push_str(&format!("<cellXfs count=\"{}\">\n", self.xfs.len()));
        for xf in &self.xfs {
            xml.push_str(&format!(
                "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
                xf.font, xf.fill, xf.border
            ));
            if xf.font > 0 {
                xml.push_str(" applyFont=\"1\"");
            }
            if xf.fill > 0 {
                xml.push_str(" applyFill=\"1\"");
            }
            if xf.border > 0 {
                xml.push_str(" applyBorder=\"1\"");
            }
            if xf.alignment == Alignment::default() {
                xml.push_str("/>\n");
            } else {
                xml.push_str(" applyAlignment=\"1\"><alignment");
                if xf.alignment.horizontal != HorizontalAlign::General {
                    xml.push_str(&format!(
                        " horizontal=\"{}\"",
                        xf.alignment.horizontal.as_str()
                    ));
                }
                if xf.alignment.vertical != VerticalAlign::Bottom {
                    xml.push_str(&format!(" vertical=\"{}\"", xf.alignment.vertical.as_str()));
                }
                if xf.alignment.wrap {
                    xml.push_str(" wrapText=\"1\"");
                }
                xml.push_str("/></xf>\n");
            }
        }
        xml.push_str("</cellXfs>\n");

        xml.push_str("<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>\n");
        xml.push_str("</styleSheet>");
        xml
    }
}

/// An in-memory workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    styles: StyleTable,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a worksheet
    ///
    /// Fails if the name is empty, longer than 31 characters, contains any
    /// of `[]:*?/\`, or matches an existing sheet case-insensitively.
    pub fn add_sheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        validate_sheet_name(name)?;
        if self.sheet(name).is_some() {
            return Err(OoxmlError::DuplicateSheet(name.to_string()));
        }
        debug!(sheet = name, "Adding worksheet");
        self.sheets.push(Worksheet::new(name.to_string()));
        let last = self.sheets.len() - 1;
        Ok(&mut self.sheets[last])
    }

    /// Find a sheet by name, case-insensitively
    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    /// Register a cell style, reusing an identical one if present
    pub fn add_style(&mut self, style: &CellStyle) -> StyleId {
        self.styles.register(style)
    }

    /// Serialize the workbook to XLSX bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_archive().to_bytes()
    }

    /// Write the workbook to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_archive().write_to_file(path)
    }

    fn to_archive(&self) -> OoxmlArchive {
        let mut archive = OoxmlArchive::new();
        let mut content_types = ContentTypes::new();
        let mut rels = Relationships::new();

        let mut workbook_xml = String::new();
        workbook_xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        workbook_xml.push('\n');
        workbook_xml.push_str(&format!(
            "<workbook xmlns=\"{}\" xmlns:r=\"{}\">\n<sheets>\n",
            MAIN_NS, REL_NS
        ));

        for (idx, sheet) in self.sheets.iter().enumerate() {
            let number = idx + 1;
            let target = format!("worksheets/sheet{}.xml", number);
            let rel_id = rels.add(target.as_str(), Relationships::TYPE_WORKSHEET);
            workbook_xml.push_str(&format!(
                "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"{}\"/>\n",
                escape(sheet.name.as_str()),
                number,
                rel_id
            ));

            let part = format!("xl/{}", target);
            content_types.add_override(part.as_str(), CT_WORKSHEET);
            archive.set_string(part, sheet.to_xml());
        }
        workbook_xml.push_str("</sheets>\n</workbook>");

        rels.add("styles.xml", Relationships::TYPE_STYLES);
        content_types.add_override(XLSX_STYLES_PART, CT_XLSX_STYLES);

        write_package_parts(&mut archive, content_types, WORKBOOK_PART, CT_WORKBOOK, None);
        archive.set_string(WORKBOOK_PART, workbook_xml);
        archive.set_string("xl/_rels/workbook.xml.rels", rels.to_xml());
        archive.set_string(XLSX_STYLES_PART, self.styles.to_xml());
        archive
    }
}

/// Check a worksheet name against Excel's rules
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.chars().count() > MAX_SHEET_NAME_LEN {
        Some("name is longer than 31 characters")
    } else if name.contains(INVALID_SHEET_CHARS) {
        Some("name contains one of []:*?/\\")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(OoxmlError::InvalidSheetName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Column letters for a 1-based column index (1 = A, 27 = AA)
pub fn column_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1-style reference for a 1-based row and column
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row)
}

fn argb(color: &str) -> String {
    format!("FF{}", color.trim_start_matches('#').to_uppercase())
}
