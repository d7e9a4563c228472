//! DOCX Writer
//!
//! This module writes a [`govdoc_ast::Document`] to a Word package. Each
//! top-level block is rendered by exactly one rule, in document order;
//! paragraph and list text goes through the inline formatter so emphasis
//! markers become bold, italic and monospace runs.
//!
//! # Example
//!
//! ```
//! use govdoc_ast::{Block, Document};
//! use govdoc_ooxml::DocxWriter;
//!
//! let mut doc = Document::with_title("Charter");
//! doc.push(Block::heading(1, "Purpose"));
//! doc.push(Block::paragraph("The **CoE** governs AI."));
//!
//! let rendered = DocxWriter::new().render(&doc).unwrap();
//! assert_eq!(rendered.stats.headings, 1);
//! assert!(!rendered.bytes.is_empty());
//! ```

use std::path::Path;

use govdoc_ast::{plain_text, Block, Document, Emphasis};
use govdoc_core::format_inline;
use quick_xml::escape::escape;
use serde::Serialize;
use tracing::debug;

use crate::archive::OoxmlArchive;
use crate::error::Result;
use crate::package::{write_package_parts, ContentTypes};
use crate::relationships::Relationships;
use crate::theme::{half_points, DocxTheme};

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Styles part
pub const STYLES_PART: &str = "word/styles.xml";
/// Numbering definitions part
pub const NUMBERING_PART: &str = "word/numbering.xml";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Paragraph style for bulleted list items
pub const LIST_BULLET_STYLE: &str = "ListBullet";
/// Paragraph style for numbered list items
pub const LIST_NUMBER_STYLE: &str = "ListNumber";

/// numId shared by every bulleted list
const BULLET_NUM_ID: u32 = 1;

/// Text width of a letter page with 1in margins, in twips
const TEXT_WIDTH_TWIPS: usize = 9360;

/// Unchecked checkbox marker
pub const CHECKBOX_OPEN: char = '☐';
/// Checked checkbox marker
pub const CHECKBOX_DONE: char = '☑';

/// Counts of what the writer emitted, per rendering rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Headings rendered with a Heading1-4 style
    pub headings: usize,
    /// Level 5-6 headings rendered as bold paragraphs
    pub minor_headings: usize,
    pub paragraphs: usize,
    pub list_items: usize,
    pub tables: usize,
    pub code_blocks: usize,
    pub quotes: usize,
    pub rules: usize,
    /// Blocks with no rendering rule
    pub skipped: usize,
}

/// A rendered package and what went into it
#[derive(Debug, Clone)]
pub struct RenderedDocx {
    /// The DOCX file contents
    pub bytes: Vec<u8>,
    pub stats: RenderStats,
}

/// List flavour, selecting paragraph style and numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Number,
}

/// DOCX Writer for generating Word documents from blocks
pub struct DocxWriter {
    /// Styling injected at construction
    theme: DocxTheme,
    /// XML output buffer for document.xml
    output: String,
    stats: RenderStats,
    /// Ordered lists seen so far; each gets its own numbering instance
    ordered_lists: u32,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    /// Create a writer with the default theme
    pub fn new() -> Self {
        Self::with_theme(DocxTheme::default())
    }

    /// Create a writer with a custom theme
    pub fn with_theme(theme: DocxTheme) -> Self {
        Self {
            theme,
            output: String::new(),
            stats: RenderStats::default(),
            ordered_lists: 0,
        }
    }

    /// Render a document with the default theme and return the DOCX bytes
    pub fn generate(doc: &Document) -> Result<Vec<u8>> {
        Ok(Self::new().render(doc)?.bytes)
    }

    /// Render a document into a complete DOCX package
    pub fn render(mut self, doc: &Document) -> Result<RenderedDocx> {
        let document_xml = self.generate_document_xml(doc);

        let mut archive = OoxmlArchive::new();
        let mut content_types = ContentTypes::new();
        content_types.add_override(STYLES_PART, CT_STYLES);
        content_types.add_override(NUMBERING_PART, CT_NUMBERING);
        write_package_parts(
            &mut archive,
            content_types,
            DOCUMENT_PART,
            CT_DOCUMENT,
            doc.title.as_deref(),
        );

        let mut rels = Relationships::new();
        rels.add("styles.xml", Relationships::TYPE_STYLES);
        rels.add("numbering.xml", Relationships::TYPE_NUMBERING);
        archive.set_string("word/_rels/document.xml.rels", rels.to_xml());

        archive.set_string(DOCUMENT_PART, document_xml);
        archive.set_string(STYLES_PART, self.generate_styles_xml());
        archive.set_string(NUMBERING_PART, self.generate_numbering_xml());

        let bytes = archive.to_bytes()?;
        debug!(
            title = doc.title.as_deref().unwrap_or(""),
            blocks = doc.len(),
            bytes = bytes.len(),
            "Rendered DOCX"
        );

        Ok(RenderedDocx {
            bytes,
            stats: self.stats,
        })
    }

    /// Render a document and write it to `path`
    pub fn write_to_file<P: AsRef<Path>>(self, doc: &Document, path: P) -> Result<RenderStats> {
        let rendered = self.render(doc)?;
        std::fs::write(path, &rendered.bytes)?;
        Ok(rendered.stats)
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &Document) -> String {
        self.output.clear();

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n",
            W_NS, R_NS
        ));
        self.output.push_str("<w:body>\n");

        for block in &doc.blocks {
            self.generate_block(block);
        }

        self.output.push_str("<w:sectPr>\n");
        self.output
            .push_str("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>\n");
        self.output.push_str(
            "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\n",
        );
        self.output.push_str("</w:sectPr>\n");
        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, text } => self.generate_heading(*level, text),
            Block::Paragraph(text) => self.generate_paragraph(text),
            Block::UnorderedList(items) => self.generate_list(items, ListKind::Bullet),
            Block::OrderedList(items) => self.generate_list(items, ListKind::Number),
            Block::Table(rows) => self.generate_table(rows),
            Block::CodeBlock(code) => self.generate_code_block(code),
            Block::Quote(text) => self.generate_quote(text),
            Block::Rule => self.generate_rule(),
            Block::Other(_) => {
                debug!(kind = block.kind(), "Skipping block with no rendering rule");
                self.stats.skipped += 1;
            }
        }
    }

    /// Levels 1-4 use heading styles; deeper levels become bold paragraphs
    fn generate_heading(&mut self, level: u8, text: &str) {
        if self.theme.heading(level).is_some() {
            self.output.push_str("<w:p>\n<w:pPr>\n");
            self.output
                .push_str(&format!("<w:pStyle w:val=\"Heading{}\"/>\n", level));
            self.output.push_str("</w:pPr>\n");
            self.push_run(text, "");
            self.output.push_str("</w:p>\n");
            self.stats.headings += 1;
        } else {
            let size = self.theme.minor_heading_size(level);
            let props = run_props(None, true, false, Some(size));
            self.output.push_str("<w:p>\n");
            self.push_run(text, &props);
            self.output.push_str("</w:p>\n");
            self.stats.minor_headings += 1;
        }
    }

    fn generate_paragraph(&mut self, text: &str) {
        self.output.push_str("<w:p>\n");
        self.push_spans(text);
        self.output.push_str("</w:p>\n");
        self.stats.paragraphs += 1;
    }

    /// One paragraph per item
    fn generate_list(&mut self, items: &[String], kind: ListKind) {
        let (style, num_id) = match kind {
            ListKind::Bullet => (LIST_BULLET_STYLE, BULLET_NUM_ID),
            ListKind::Number => {
                self.ordered_lists += 1;
                (LIST_NUMBER_STYLE, BULLET_NUM_ID + self.ordered_lists)
            }
        };

        for item in items {
            self.output.push_str("<w:p>\n<w:pPr>\n");
            self.output
                .push_str(&format!("<w:pStyle w:val=\"{}\"/>\n", style));
            self.output.push_str("<w:numPr>\n<w:ilvl w:val=\"0\"/>\n");
            self.output
                .push_str(&format!("<w:numId w:val=\"{}\"/>\n", num_id));
            self.output.push_str("</w:numPr>\n</w:pPr>\n");

            // Checkbox items bypass emphasis parsing
            match checkbox_label(item) {
                Some(label) => self.push_run(&label, ""),
                None => self.push_spans(item),
            }

            self.output.push_str("</w:p>\n");
        }
        self.stats.list_items += items.len();
    }

    /// Column count comes from the header row; short rows are padded, long rows cut
    fn generate_table(&mut self, rows: &[Vec<String>]) {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        if columns == 0 {
            debug!("Skipping table without columns");
            self.stats.skipped += 1;
            return;
        }
        let col_width = TEXT_WIDTH_TWIPS / columns;

        self.output.push_str("<w:tbl>\n<w:tblPr>\n");
        self.output.push_str(&format!(
            "<w:tblStyle w:val=\"{}\"/>\n",
            escape(self.theme.table_style.as_str())
        ));
        self.output.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/>\n");
        self.output.push_str("<w:jc w:val=\"center\"/>\n");
        self.output.push_str("<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"1\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>\n");
        self.output.push_str("</w:tblPr>\n<w:tblGrid>\n");
        for _ in 0..columns {
            self.output
                .push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", col_width));
        }
        self.output.push_str("</w:tblGrid>\n");

        let header_props = run_props(None, true, false, None);
        for (row_idx, row) in rows.iter().enumerate() {
            self.output.push_str("<w:tr>\n");
            for col in 0..columns {
                let text = row.get(col).map(|c| c.trim()).unwrap_or("");
                self.output.push_str("<w:tc>\n<w:tcPr>\n");
                self.output.push_str(&format!(
                    "<w:tcW w:w=\"{}\" w:type=\"dxa\"/>\n",
                    col_width
                ));
                self.output.push_str("</w:tcPr>\n");
                if text.is_empty() {
                    self.output.push_str("<w:p/>\n");
                } else {
                    self.output.push_str("<w:p>\n");
                    let props = if row_idx == 0 { header_props.as_str() } else { "" };
                    self.push_run(text, props);
                    self.output.push_str("</w:p>\n");
                }
                self.output.push_str("</w:tc>\n");
            }
            self.output.push_str("</w:tr>\n");
        }
        self.output.push_str("</w:tbl>\n");

        // Spacing after the table
        self.output.push_str("<w:p/>\n");
        self.stats.tables += 1;
    }

    fn generate_code_block(&mut self, code: &str) {
        let props = run_props(
            Some(self.theme.code_font.as_str()),
            false,
            false,
            Some(self.theme.code_block_size),
        );
        self.push_indented_paragraph(code, &props);
        self.stats.code_blocks += 1;
    }

    fn generate_quote(&mut self, text: &str) {
        let props = run_props(None, false, true, None);
        self.push_indented_paragraph(text, &props);
        self.stats.quotes += 1;
    }

    fn generate_rule(&mut self) {
        let rule = self.theme.rule_text();
        self.output.push_str("<w:p>\n<w:pPr>\n<w:jc w:val=\"center\"/>\n</w:pPr>\n");
        self.push_run(&rule, "");
        self.output.push_str("</w:p>\n");
        self.stats.rules += 1;
    }

    fn push_indented_paragraph(&mut self, text: &str, props: &str) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output
            .push_str(&format!("<w:ind w:left=\"{}\"/>\n", self.theme.indent_twips));
        self.output.push_str("</w:pPr>\n");
        self.push_run(text, props);
        self.output.push_str("</w:p>\n");
    }

    /// Segment marked text into styled runs
    fn push_spans(&mut self, text: &str) {
        for span in format_inline(text) {
            let props = match span.emphasis {
                Emphasis::Code => run_props(
                    Some(self.theme.code_font.as_str()),
                    false,
                    false,
                    Some(self.theme.inline_code_size),
                ),
                emphasis => run_props(None, emphasis.is_bold(), emphasis.is_italic(), None),
            };
            self.push_run(&span.text, &props);
        }
    }

    /// Emit one run; newlines become `<w:br/>`
    fn push_run(&mut self, text: &str, props: &str) {
        self.output.push_str("<w:r>\n");
        if !props.is_empty() {
            self.output.push_str("<w:rPr>\n");
            self.output.push_str(props);
            self.output.push_str("</w:rPr>\n");
        }
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.output.push_str("<w:br/>\n");
            }
            if !line.is_empty() {
                self.output.push_str(&format!(
                    "<w:t xml:space=\"preserve\">{}</w:t>\n",
                    escape(line)
                ));
            }
        }
        self.output.push_str("</w:r>\n");
    }

    /// Generate word/styles.xml from the theme
    fn generate_styles_xml(&self) -> String {
        let theme = &self.theme;
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!("<w:styles xmlns:w=\"{}\">\n", W_NS));

        xml.push_str("<w:docDefaults>\n<w:rPrDefault>\n<w:rPr>\n");
        xml.push_str(&run_props(
            Some(theme.body_font.as_str()),
            false,
            false,
            Some(theme.body_size),
        ));
        xml.push_str("</w:rPr>\n</w:rPrDefault>\n<w:pPrDefault>\n<w:pPr>\n");
        xml.push_str("<w:spacing w:after=\"160\" w:line=\"259\" w:lineRule=\"auto\"/>\n");
        xml.push_str("</w:pPr>\n</w:pPrDefault>\n</w:docDefaults>\n");

        xml.push_str("<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">\n");
        xml.push_str("<w:name w:val=\"Normal\"/>\n<w:qFormat/>\n</w:style>\n");

        for (idx, heading) in (1..=4u8).filter_map(|level| theme.heading(level)).enumerate() {
            let level = idx + 1;
            xml.push_str(&format!(
                "<w:style w:type=\"paragraph\" w:styleId=\"Heading{}\">\n",
                level
            ));
            xml.push_str(&format!("<w:name w:val=\"heading {}\"/>\n", level));
            xml.push_str("<w:basedOn w:val=\"Normal\"/>\n<w:next w:val=\"Normal\"/>\n<w:qFormat/>\n");
            xml.push_str("<w:pPr>\n<w:keepNext/>\n<w:spacing w:before=\"240\" w:after=\"120\"/>\n");
            xml.push_str(&format!("<w:outlineLvl w:val=\"{}\"/>\n</w:pPr>\n", idx));
            xml.push_str("<w:rPr>\n<w:b/>\n");
            xml.push_str(&format!(
                "<w:color w:val=\"{}\"/>\n",
                escape(heading.color.as_str())
            ));
            xml.push_str(&format!(
                "<w:sz w:val=\"{0}\"/>\n<w:szCs w:val=\"{0}\"/>\n",
                half_points(heading.size)
            ));
            xml.push_str("</w:rPr>\n</w:style>\n");
        }

        for (style_id, name) in [
            (LIST_BULLET_STYLE, "List Bullet"),
            (LIST_NUMBER_STYLE, "List Number"),
        ] {
            xml.push_str(&format!(
                "<w:style w:type=\"paragraph\" w:styleId=\"{}\">\n",
                style_id
            ));
            xml.push_str(&format!("<w:name w:val=\"{}\"/>\n", name));
            xml.push_str("<w:basedOn w:val=\"Normal\"/>\n");
            xml.push_str("<w:pPr>\n<w:ind w:left=\"720\" w:hanging=\"360\"/>\n<w:contextualSpacing/>\n</w:pPr>\n");
            xml.push_str("</w:style>\n");
        }

        xml.push_str("<w:style w:type=\"table\" w:default=\"1\" w:styleId=\"TableNormal\">\n");
        xml.push_str("<w:name w:val=\"Normal Table\"/>\n<w:tblPr>\n<w:tblInd w:w=\"0\" w:type=\"dxa\"/>\n");
        xml.push_str("<w:tblCellMar>\n<w:top w:w=\"0\" w:type=\"dxa\"/>\n<w:left w:w=\"108\" w:type=\"dxa\"/>\n");
        xml.push_str("<w:bottom w:w=\"0\" w:type=\"dxa\"/>\n<w:right w:w=\"108\" w:type=\"dxa\"/>\n</w:tblCellMar>\n");
        xml.push_str("</w:tblPr>\n</w:style>\n");

        xml.push_str(&format!(
            "<w:style w:type=\"table\" w:styleId=\"{}\">\n",
            escape(theme.table_style.as_str())
        ));
        xml.push_str("<w:name w:val=\"Table Grid\"/>\n<w:basedOn w:val=\"TableNormal\"/>\n");
        xml.push_str("<w:pPr>\n<w:spacing w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/>\n</w:pPr>\n");
        xml.push_str("<w:tblPr>\n<w:tblBorders>\n");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            xml.push_str(&format!(
                "<w:{} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>\n",
                edge
            ));
        }
        xml.push_str("</w:tblBorders>\n</w:tblPr>\n</w:style>\n");

        xml.push_str("</w:styles>");
        xml
    }

    /// Generate word/numbering.xml: one bullet instance, one decimal instance per ordered list
    fn generate_numbering_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!("<w:numbering xmlns:w=\"{}\">\n", W_NS));

        for (abstract_id, fmt, text) in [(0, "bullet", "•"), (1, "decimal", "%1.")] {
            xml.push_str(&format!(
                "<w:abstractNum w:abstractNumId=\"{}\">\n",
                abstract_id
            ));
            xml.push_str("<w:multiLevelType w:val=\"singleLevel\"/>\n");
            xml.push_str("<w:lvl w:ilvl=\"0\">\n<w:start w:val=\"1\"/>\n");
            xml.push_str(&format!("<w:numFmt w:val=\"{}\"/>\n", fmt));
            xml.push_str(&format!("<w:lvlText w:val=\"{}\"/>\n", text));
            xml.push_str("<w:lvlJc w:val=\"left\"/>\n");
            xml.push_str("<w:pPr>\n<w:ind w:left=\"720\" w:hanging=\"360\"/>\n</w:pPr>\n");
            xml.push_str("</w:lvl>\n</w:abstractNum>\n");
        }

        xml.push_str(&format!(
            "<w:num w:numId=\"{}\">\n<w:abstractNumId w:val=\"0\"/>\n</w:num>\n",
            BULLET_NUM_ID
        ));
        for n in 1..=self.ordered_lists {
            xml.push_str(&format!("<w:num w:numId=\"{}\">\n", BULLET_NUM_ID + n));
            xml.push_str("<w:abstractNumId w:val=\"1\"/>\n");
            xml.push_str("<w:lvlOverride w:ilvl=\"0\">\n<w:startOverride w:val=\"1\"/>\n</w:lvlOverride>\n");
            xml.push_str("</w:num>\n");
        }

        xml.push_str("</w:numbering>");
        xml
    }
}

/// Render text for a checkbox list item, if it is one
///
/// `[ ]` becomes `☐ ` and `[x]`/`[X]` become `☑ `, followed by the trimmed
/// remainder of the item with its emphasis markers removed.
pub fn checkbox_label(item: &str) -> Option<String> {
    let (mark, rest) = match item.strip_prefix("[ ]") {
        Some(rest) => (CHECKBOX_OPEN, rest),
        None => (
            CHECKBOX_DONE,
            item.strip_prefix("[x]")
                .or_else(|| item.strip_prefix("[X]"))?,
        ),
    };
    Some(format!("{} {}", mark, plain_text(&format_inline(rest.trim()))))
}

/// Build run properties in schema order
fn run_props(font: Option<&str>, bold: bool, italic: bool, size: Option<u32>) -> String {
    let mut props = String::new();
    if let Some(font) = font {
        let font = escape(font);
        props.push_str(&format!(
            "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:cs=\"{0}\"/>\n",
            font
        ));
    }
    if bold {
        props.push_str("<w:b/>\n");
    }
    if italic {
        props.push_str("<w:i/>\n");
    }
    if let Some(size) = size {
        props.push_str(&format!(
            "<w:sz w:val=\"{0}\"/>\n<w:szCs w:val=\"{0}\"/>\n",
            half_points(size)
        ));
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn document_xml(blocks: Vec<Block>) -> (String, RenderStats) {
        let mut doc = Document::new();
        for block in blocks {
            doc.push(block);
        }
        let rendered = DocxWriter::new().render(&doc).unwrap();
        let archive = OoxmlArchive::from_reader(Cursor::new(rendered.bytes)).unwrap();
        (archive.get_string(DOCUMENT_PART).unwrap(), rendered.stats)
    }

    #[test]
    fn test_package_parts() {
        let doc = Document::with_title("Policy");
        let bytes = DocxWriter::generate(&doc).unwrap();
        let archive = OoxmlArchive::from_reader(Cursor::new(bytes)).unwrap();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            DOCUMENT_PART,
            STYLES_PART,
            NUMBERING_PART,
            "word/_rels/document.xml.rels",
            "docProps/core.xml",
        ] {
            assert!(archive.contains(part), "missing {}", part);
        }
        assert!(archive
            .get_string("docProps/core.xml")
            .unwrap()
            .contains("<dc:title>Policy</dc:title>"));
    }

    #[test]
    fn test_heading_levels() {
        let (xml, stats) = document_xml(vec![
            Block::heading(1, "Top"),
            Block::heading(4, "Deep"),
            Block::heading(5, "Minor"),
            Block::heading(6, "Smallest"),
        ]);
        assert!(xml.contains("<w:pStyle w:val=\"Heading1\"/>"));
        assert!(xml.contains("<w:pStyle w:val=\"Heading4\"/>"));
        assert!(!xml.contains("Heading5"));
        assert!(xml.contains("<w:sz w:val=\"22\"/>"));
        assert!(xml.contains("<w:sz w:val=\"20\"/>"));
        assert_eq!(stats.headings, 2);
        assert_eq!(stats.minor_headings, 2);
    }

    #[test]
    fn test_paragraph_emphasis_runs() {
        let (xml, stats) = document_xml(vec![Block::paragraph(
            "**Bold** and *italic* and `code`",
        )]);
        assert!(xml.contains("<w:b/>\n</w:rPr>\n<w:t xml:space=\"preserve\">Bold</w:t>"));
        assert!(xml.contains("<w:i/>\n</w:rPr>\n<w:t xml:space=\"preserve\">italic</w:t>"));
        assert!(xml.contains("w:ascii=\"Consolas\""));
        assert!(!xml.contains("**"));
        assert_eq!(stats.paragraphs, 1);
    }

    #[test]
    fn test_checkbox_items_are_single_plain_runs() {
        let (xml, stats) = document_xml(vec![Block::UnorderedList(vec![
            "[x] Done **task**".to_string(),
            "[ ]   Pending".to_string(),
        ])]);
        assert!(xml.contains("<w:t xml:space=\"preserve\">☑ Done task</w:t>"));
        assert!(!xml.contains("**"));
        assert!(xml.contains("<w:t xml:space=\"preserve\">☐ Pending</w:t>"));
        assert!(!xml.contains("<w:b/>"));
        assert_eq!(stats.list_items, 2);
    }

    #[test]
    fn test_checkbox_label() {
        assert_eq!(checkbox_label("[x] Done task"), Some("☑ Done task".to_string()));
        assert_eq!(checkbox_label("[X] Done"), Some("☑ Done".to_string()));
        assert_eq!(checkbox_label("[ ] Todo"), Some("☐ Todo".to_string()));
        assert_eq!(checkbox_label("Plain item"), None);
        assert_eq!(checkbox_label(" [x] indented"), None);
    }

    #[test]
    fn test_checkbox_label_strips_markers() {
        assert_eq!(
            checkbox_label("[x] Done *task*"),
            Some("☑ Done task".to_string())
        );
        assert_eq!(
            checkbox_label("[ ] Review `cfg` and **owners**"),
            Some("☐ Review cfg and owners".to_string())
        );
        assert_eq!(
            checkbox_label(r"[ ] 2 \* 3"),
            Some("☐ 2 * 3".to_string())
        );
    }

    #[test]
    fn test_ordered_lists_restart_numbering() {
        let (xml, _) = document_xml(vec![
            Block::OrderedList(vec!["One".to_string()]),
            Block::UnorderedList(vec!["Bullet".to_string()]),
            Block::OrderedList(vec!["Again".to_string()]),
        ]);
        assert!(xml.contains("<w:numId w:val=\"2\"/>"));
        assert!(xml.contains("<w:numId w:val=\"3\"/>"));
        assert!(xml.contains("<w:pStyle w:val=\"ListBullet\"/>"));

        let mut doc = Document::new();
        doc.push(Block::OrderedList(vec!["a".into()]));
        doc.push(Block::OrderedList(vec!["b".into()]));
        let mut writer = DocxWriter::new();
        writer.generate_document_xml(&doc);
        let numbering = writer.generate_numbering_xml();
        assert_eq!(numbering.matches("<w:startOverride w:val=\"1\"/>").count(), 2);
    }

    #[test]
    fn test_table_shape() {
        let (xml, stats) = document_xml(vec![Block::Table(vec![
            vec!["Role".into(), "Duty".into()],
            vec!["Sponsor".into()],
            vec!["Lead".into(), "Deliver".into(), "Extra".into()],
        ])]);
        assert_eq!(xml.matches("<w:tr>").count(), 3);
        assert_eq!(xml.matches("<w:tc>").count(), 6);
        assert!(!xml.contains("Extra"));
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
        assert!(xml.contains("<w:tblStyle w:val=\"TableGrid\"/>"));
        assert!(xml.contains("</w:tbl>\n<w:p/>"));
        assert_eq!(stats.tables, 1);
    }

    #[test]
    fn test_code_quote_rule() {
        let (xml, stats) = document_xml(vec![
            Block::CodeBlock("line one\nline <two>".to_string()),
            Block::Quote("Wisdom".to_string()),
            Block::Rule,
        ]);
        assert!(xml.contains("<w:ind w:left=\"720\"/>"));
        assert!(xml.contains("<w:sz w:val=\"18\"/>"));
        assert!(xml.contains("line one</w:t>\n<w:br/>"));
        assert!(xml.contains("line &lt;two&gt;"));
        assert!(xml.contains("<w:i/>"));
        assert!(xml.contains(&"─".repeat(50)));
        assert_eq!((stats.code_blocks, stats.quotes, stats.rules), (1, 1, 1));
    }

    #[test]
    fn test_other_blocks_skipped() {
        let (xml, stats) = document_xml(vec![Block::Other("html_block".to_string())]);
        assert!(!xml.contains("<w:p>"));
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_styles_follow_theme() {
        let mut theme = DocxTheme::default();
        theme.headings[0].color = "AA0000".to_string();
        let writer = DocxWriter::with_theme(theme);
        let styles = writer.generate_styles_xml();
        assert!(styles.contains("<w:color w:val=\"AA0000\"/>"));
        assert!(styles.contains("<w:color w:val=\"004C99\"/>"));
        assert!(styles.contains("w:styleId=\"TableGrid\""));
        assert!(styles.contains("w:ascii=\"Calibri\""));
    }

    #[test]
    fn test_short_heading_list_still_styles_all_levels() {
        let theme = DocxTheme {
            headings: vec![crate::theme::HeadingStyle::new(20, "AA0000")],
            ..DocxTheme::default()
        };
        let writer = DocxWriter::with_theme(theme.clone());
        let styles = writer.generate_styles_xml();
        for level in 1..=4 {
            assert!(styles.contains(&format!("w:styleId=\"Heading{}\"", level)));
        }
        assert!(styles.contains("<w:color w:val=\"004C99\"/>"));

        let mut doc = Document::new();
        doc.push(Block::heading(3, "Scope"));
        let rendered = DocxWriter::with_theme(theme).render(&doc).unwrap();
        assert_eq!(rendered.stats.headings, 1);
        assert_eq!(rendered.stats.minor_headings, 0);
    }
}
