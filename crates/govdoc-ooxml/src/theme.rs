//! Visual theme for generated Word documents
//!
//! A [`DocxTheme`] is a plain value handed to the writer at construction, so
//! several themes can be used side by side. Every field has a default and
//! the whole theme can be loaded from a TOML table.

use serde::{Deserialize, Serialize};

/// Font size and colour of one heading level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingStyle {
    /// Size in points
    pub size: u32,
    /// RGB hex colour without `#`
    pub color: String,
}

impl HeadingStyle {
    pub fn new(size: u32, color: impl Into<String>) -> Self {
        Self {
            size,
            color: color.into(),
        }
    }
}

/// Styling applied by [`crate::DocxWriter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxTheme {
    /// Body font family
    pub body_font: String,
    /// Body font size in points
    pub body_size: u32,
    /// Styles for heading levels 1 to 4, in order; missing levels use the
    /// default palette
    pub headings: Vec<HeadingStyle>,
    /// Size of level 5 headings, rendered as bold paragraphs
    pub h5_size: u32,
    /// Size of level 6 headings, rendered as bold paragraphs
    pub h6_size: u32,
    /// Monospace font for code blocks and inline code
    pub code_font: String,
    /// Code block size in points
    pub code_block_size: u32,
    /// Inline code size in points
    pub inline_code_size: u32,
    /// Left indent of code blocks and quotes, in twips (1440 per inch)
    pub indent_twips: u32,
    /// Character repeated to draw a horizontal rule
    pub rule_char: char,
    /// Number of rule characters
    pub rule_width: usize,
    /// Table style ID
    pub table_style: String,
}

impl Default for DocxTheme {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            body_size: 11,
            headings: default_headings(),
            h5_size: 11,
            h6_size: 10,
            code_font: "Consolas".to_string(),
            code_block_size: 9,
            inline_code_size: 10,
            indent_twips: 720,
            rule_char: '─',
            rule_width: 50,
            table_style: "TableGrid".to_string(),
        }
    }
}

impl DocxTheme {
    /// Style for a heading level, if the level maps to a heading style
    ///
    /// Levels 1 to 4 always resolve; a level beyond the configured list
    /// falls back to the default palette.
    pub fn heading(&self, level: u8) -> Option<HeadingStyle> {
        if !(1..=4).contains(&level) {
            return None;
        }
        let idx = usize::from(level) - 1;
        match self.headings.get(idx) {
            Some(style) => Some(style.clone()),
            None => default_headings().into_iter().nth(idx),
        }
    }

    /// Size of a heading level that degrades to a bold paragraph
    pub fn minor_heading_size(&self, level: u8) -> u32 {
        if level <= 5 {
            self.h5_size
        } else {
            self.h6_size
        }
    }

    /// The horizontal rule text
    pub fn rule_text(&self) -> String {
        std::iter::repeat(self.rule_char)
            .take(self.rule_width)
            .collect()
    }
}

fn default_headings() -> Vec<HeadingStyle> {
    vec![
        HeadingStyle::new(18, "003366"),
        HeadingStyle::new(16, "004C99"),
        HeadingStyle::new(14, "336699"),
        HeadingStyle::new(12, "336699"),
    ]
}

/// Convert points to the half-point units used by `w:sz`
pub(crate) fn half_points(points: u32) -> u32 {
    points * 2
}
