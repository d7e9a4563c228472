//! Markdown parsing
//!
//! Parses markdown with comrak (tables and fenced code enabled) and lowers
//! the top-level nodes of the tree into [`govdoc_ast::Block`]s.
//!
//! Paragraph and list item text keeps its emphasis as markers (`**bold**`,
//! `*italic*`, `` `code` ``) so the inline formatter can segment it later.
//! Literal `*`, backtick and backslash characters in that text are escaped
//! with a backslash. Emphasis nested inside emphasis is flattened into the
//! outer span. Heading, quote and table cell text is plain.
//!
//! # Example
//!
//! ```
//! use govdoc_ast::Block;
//! use govdoc_core::parse_markdown;
//!
//! let doc = parse_markdown("# Charter\n\nThe **hub** owns delivery.\n");
//! assert_eq!(doc.blocks[0], Block::heading(1, "Charter"));
//! assert_eq!(doc.blocks[1], Block::paragraph("The **hub** owns delivery."));
//! ```

use std::fs;
use std::path::Path;

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use govdoc_ast::{Block, Document};

use crate::error::{CoreError, Result};
use crate::inline::{is_escapable, ESCAPE};

/// Parse markdown text into a document
pub fn parse_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, source, &options);

    let mut doc = Document::new();
    for node in root.children() {
        doc.push(lower_block(node));
    }
    doc
}

/// Read and parse a markdown file, titling the document with the file stem
pub fn parse_markdown_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.display().to_string()));
    }

    let source = fs::read_to_string(path)?;
    let mut doc = parse_markdown(&source);
    doc.title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    Ok(doc)
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options
}

/// Lower one top-level node into a block
fn lower_block<'a>(node: &'a AstNode<'a>) -> Block {
    let value = node.data.borrow().value.clone();

    match value {
        NodeValue::Heading(heading) => Block::Heading {
            level: heading.level,
            text: plain_text(node).trim().to_string(),
        },
        NodeValue::Paragraph => Block::Paragraph(marked_text(node).trim().to_string()),
        NodeValue::List(list) => {
            let items = node
                .children()
                .map(|item| list_item_text(item, TextMode::Marked))
                .collect();
            match list.list_type {
                ListType::Bullet => Block::UnorderedList(items),
                ListType::Ordered => Block::OrderedList(items),
            }
        }
        NodeValue::Table(_) => Block::Table(
            node.children()
                .map(|row| {
                    row.children()
                        .map(|cell| plain_text(cell).trim().to_string())
                        .collect()
                })
                .collect(),
        ),
        NodeValue::CodeBlock(code) => {
            Block::CodeBlock(code.literal.trim_end_matches('\n').to_string())
        }
        NodeValue::BlockQuote => Block::Quote(quote_text(node)),
        NodeValue::ThematicBreak => Block::Rule,
        NodeValue::HtmlBlock(_) => Block::Other("html_block".to_string()),
        NodeValue::FootnoteDefinition(_) => Block::Other("footnote_definition".to_string()),
        NodeValue::FrontMatter(_) => Block::Other("front_matter".to_string()),
        _ => Block::Other("unsupported".to_string()),
    }
}

/// How inline content is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMode {
    /// Emphasis re-encoded as markers
    Marked,
    Plain,
}

impl TextMode {
    fn text<'a>(self, node: &'a AstNode<'a>) -> String {
        match self {
            TextMode::Marked => marked_text(node),
            TextMode::Plain => plain_text(node),
        }
    }
}

fn is_list<'a>(node: &'a AstNode<'a>) -> bool {
    matches!(node.data.borrow().value, NodeValue::List(_))
}

/// Text of a list item: each child block on its own line, nested lists flattened
fn list_item_text<'a>(item: &'a AstNode<'a>, mode: TextMode) -> String {
    let mut lines = Vec::new();
    for child in item.children() {
        if is_list(child) {
            lines.extend(child.children().map(|nested| list_item_text(nested, mode)));
        } else {
            let text = mode.text(child);
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
    }
    lines.join("\n")
}

/// Plain text of a quote: one line per paragraph and per list item
fn quote_text<'a>(quote: &'a AstNode<'a>) -> String {
    let mut lines = Vec::new();
    for child in quote.children() {
        let is_quote = matches!(child.data.borrow().value, NodeValue::BlockQuote);
        let text = if is_list(child) {
            child
                .children()
                .map(|item| list_item_text(item, TextMode::Plain))
                .collect::<Vec<_>>()
                .join("\n")
        } else if is_quote {
            quote_text(child)
        } else {
            plain_text(child)
        };
        let text = text.trim();
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }
    lines.join("\n")
}

/// Collect text with emphasis re-encoded as markers
fn marked_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_marked(node, &mut out);
    out
}

fn collect_marked<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => push_escaped(text, out),
        NodeValue::Code(code) => {
            out.push('`');
            push_escaped(&code.literal, out);
            out.push('`');
        }
        NodeValue::Strong => push_emphasis(node, "**", out),
        NodeValue::Emph => push_emphasis(node, "*", out),
        NodeValue::SoftBreak => out.push(' '),
        NodeValue::LineBreak => out.push('\n'),
        NodeValue::HtmlInline(_) => {}
        _ => {
            for child in node.children() {
                collect_marked(child, out);
            }
        }
    }
}

/// Escape every character the inline formatter reads as a delimiter or escape
fn push_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        if is_escapable(ch) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
}

/// Wrap the plain content of an emphasis node in `marker`
///
/// `Strong` directly around `Emph` (or the reverse) becomes `***`.
fn push_emphasis<'a>(node: &'a AstNode<'a>, marker: &str, out: &mut String) {
    let mut children = node.children();
    let (marker, inner) = match (children.next(), children.next()) {
        (Some(only), None) if is_bold_italic_pair(node, only) => ("***", only),
        _ => (marker, node),
    };

    let text = plain_text(inner).replace('\n', " ");
    if text.is_empty() {
        return;
    }
    out.push_str(marker);
    push_escaped(&text, out);
    out.push_str(marker);
}

fn is_bold_italic_pair<'a>(outer: &'a AstNode<'a>, inner: &'a AstNode<'a>) -> bool {
    let outer = &outer.data.borrow().value;
    let inner = &inner.data.borrow().value;
    matches!(
        (outer, inner),
        (NodeValue::Strong, NodeValue::Emph) | (NodeValue::Emph, NodeValue::Strong)
    )
}

/// Collect text without any formatting
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_plain(node, &mut out);
    out
}

fn collect_plain<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::CodeBlock(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak => out.push(' '),
        NodeValue::LineBreak => out.push('\n'),
        NodeValue::HtmlInline(_) => {}
        _ => {
            for child in node.children() {
                collect_plain(child, out);
            }
        }
    }
}
