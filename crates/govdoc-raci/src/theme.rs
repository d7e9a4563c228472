//! Colours, fonts and layout of RACI workbooks

use serde::{Deserialize, Serialize};

use crate::code::RaciCode;

/// Styling applied by [`crate::WorkbookBuilder`]
///
/// Colours are RGB hex strings without `#`. Loaded from the `[raci.theme]`
/// table of the configuration file; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookTheme {
    pub font_name: String,

    pub responsible_fill: String,
    pub accountable_fill: String,
    pub consulted_fill: String,
    pub informed_fill: String,
    pub responsible_accountable_fill: String,
    pub header_fill: String,

    /// Font colour on header and coded cells
    pub contrast_color: String,
    pub border_color: String,

    pub header_size: u32,
    pub code_size: u32,
    pub text_size: u32,

    pub title_size: u32,
    pub subtitle_size: u32,
    pub title_color: String,
    /// Size of the overview table labels ("RACI Legend", ...)
    pub label_size: u32,
    pub section_size: u32,
    pub section_color: String,
    pub subsection_size: u32,
    pub subsection_color: String,

    pub first_column_width: f64,
    pub column_width: f64,
    pub header_row_height: f64,
    pub data_row_height: f64,
    /// Blank rows after each table
    pub table_gap: u32,
    /// Extra blank rows after each section
    pub section_gap: u32,
}

impl Default for WorkbookTheme {
    fn default() -> Self {
        Self {
            font_name: "Calibri".to_string(),
            responsible_fill: "4472C4".to_string(),
            accountable_fill: "ED7D31".to_string(),
            consulted_fill: "FFC000".to_string(),
            informed_fill: "A5A5A5".to_string(),
            responsible_accountable_fill: "C65911".to_string(),
            header_fill: "2F5496".to_string(),
            contrast_color: "FFFFFF".to_string(),
            border_color: "000000".to_string(),
            header_size: 11,
            code_size: 10,
            text_size: 10,
            title_size: 16,
            subtitle_size: 12,
            title_color: "2F5496".to_string(),
            label_size: 14,
            section_size: 14,
            section_color: "2F5496".to_string(),
            subsection_size: 12,
            subsection_color: "404040".to_string(),
            first_column_width: 50.0,
            column_width: 15.0,
            header_row_height: 30.0,
            data_row_height: 25.0,
            table_gap: 2,
            section_gap: 2,
        }
    }
}

impl WorkbookTheme {
    /// Fill colour for a RACI code
    pub fn fill_for(&self, code: RaciCode) -> &str {
        match code {
            RaciCode::Responsible => &self.responsible_fill,
            RaciCode::Accountable => &self.accountable_fill,
            RaciCode::Consulted => &self.consulted_fill,
            RaciCode::Informed => &self.informed_fill,
            RaciCode::ResponsibleAccountable => &self.responsible_accountable_fill,
        }
    }
}
