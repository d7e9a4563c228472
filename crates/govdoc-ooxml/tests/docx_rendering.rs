//! DOCX rendering tests
//!
//! Render block sequences and markdown sources, then walk the generated
//! `word/document.xml` with quick-xml.

use std::io::Cursor;

use govdoc_ast::{Block, Document};
use govdoc_core::parse_markdown;
use govdoc_ooxml::docx::DOCUMENT_PART;
use govdoc_ooxml::{DocxWriter, OoxmlArchive};
use quick_xml::events::Event;
use quick_xml::Reader;

/// What a walk over document.xml found at body level
#[derive(Debug, Default, PartialEq, Eq)]
struct BodyCounts {
    paragraphs: usize,
    heading_styles: usize,
    list_paragraphs: usize,
    tables: usize,
}

fn document_xml(doc: &Document) -> String {
    let bytes = DocxWriter::generate(doc).expect("render");
    let archive = OoxmlArchive::from_reader(Cursor::new(bytes)).expect("valid zip");
    archive.get_string(DOCUMENT_PART).expect("document part")
}

fn count_body(xml: &str) -> BodyCounts {
    let mut reader = Reader::from_str(xml);
    let mut counts = BodyCounts::default();
    let mut table_depth = 0usize;

    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"w:p" && table_depth == 0 => {
                counts.paragraphs += 1;
            }
            Event::Start(e) if e.name().as_ref() == b"w:tbl" => {
                if table_depth == 0 {
                    counts.tables += 1;
                }
                table_depth += 1;
            }
            Event::End(e) if e.name().as_ref() == b"w:tbl" => table_depth -= 1,
            Event::Empty(e) if e.name().as_ref() == b"w:pStyle" => {
                let value = e
                    .try_get_attribute("w:val")
                    .ok()
                    .flatten()
                    .map(|a| String::from_utf8_lossy(&a.value).into_owned())
                    .unwrap_or_default();
                if value.starts_with("Heading") {
                    counts.heading_styles += 1;
                } else if value.starts_with("List") {
                    counts.list_paragraphs += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    counts
}

/// Deterministic block sequence from a seed
fn blocks_from_seed(seed: u64, len: usize) -> Vec<Block> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    (0..len)
        .map(|i| match next() % 9 {
            0 => Block::heading((next() % 6 + 1) as u8, format!("Heading {}", i)),
            1 => Block::paragraph(format!("Para **{}** with *emphasis*", i)),
            2 => Block::UnorderedList((0..next() % 4 + 1).map(|n| format!("item {}", n)).collect()),
            3 => Block::OrderedList((0..next() % 3 + 1).map(|n| format!("step {}", n)).collect()),
            4 => Block::Table(vec![
                vec!["A".into(), "B".into()],
                vec!["1".into(), "2".into()],
            ]),
            5 => Block::CodeBlock(format!("code {}\nmore", i)),
            6 => Block::Quote(format!("quote {}", i)),
            7 => Block::Rule,
            _ => Block::Other("html_block".to_string()),
        })
        .collect()
}

fn expected_counts(blocks: &[Block]) -> BodyCounts {
    let mut expected = BodyCounts::default();
    for block in blocks {
        match block {
            Block::Heading { level, .. } => {
                expected.paragraphs += 1;
                if *level <= 4 {
                    expected.heading_styles += 1;
                }
            }
            Block::UnorderedList(items) | Block::OrderedList(items) => {
                expected.paragraphs += items.len();
                expected.list_paragraphs += items.len();
            }
            Block::Table(_) => {
                // Spacing paragraph after the table
                expected.paragraphs += 1;
                expected.tables += 1;
            }
            Block::Other(_) => {}
            _ => expected.paragraphs += 1,
        }
    }
    expected
}

#[test]
fn test_output_counts_match_block_counts() {
    for seed in 1..=25 {
        let blocks = blocks_from_seed(seed, 30);
        let mut doc = Document::new();
        for block in blocks.iter().cloned() {
            doc.push(block);
        }

        let counts = count_body(&document_xml(&doc));
        assert_eq!(counts, expected_counts(&blocks), "seed {}", seed);
    }
}

#[test]
fn test_stats_match_block_counts() {
    let blocks = blocks_from_seed(42, 60);
    let mut doc = Document::new();
    for block in blocks.iter().cloned() {
        doc.push(block);
    }
    let stats = DocxWriter::new().render(&doc).unwrap().stats;

    let headings = blocks
        .iter()
        .filter(|b| matches!(b, Block::Heading { level, .. } if *level <= 4))
        .count();
    let minor = blocks
        .iter()
        .filter(|b| matches!(b, Block::Heading { level, .. } if *level > 4))
        .count();
    let skipped = blocks.iter().filter(|b| matches!(b, Block::Other(_))).count();

    assert_eq!(stats.headings, headings);
    assert_eq!(stats.minor_headings, minor);
    assert_eq!(stats.skipped, skipped);
}

#[test]
fn test_markdown_to_docx_end_to_end() {
    let source = "# Policy\n\n**Bold** and *italic* and `code`\n\n- [x] Done *task*\n- [ ] Open item\n\n| Role | Duty |\n|---|---|\n| Sponsor | Fund |\n";
    let xml = document_xml(&parse_markdown(source));

    assert!(xml.contains("<w:pStyle w:val=\"Heading1\"/>"));
    assert!(xml.contains("<w:t xml:space=\"preserve\">☑ Done task</w:t>"));
    assert!(xml.contains("<w:t xml:space=\"preserve\">☐ Open item</w:t>"));
    assert!(xml.contains("<w:t xml:space=\"preserve\"> and </w:t>"));

    let counts = count_body(&xml);
    assert_eq!(counts.tables, 1);
    assert_eq!(counts.list_paragraphs, 2);
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Charter.docx");

    let doc = parse_markdown("## Scope\n\nAll initiatives.\n");
    let stats = DocxWriter::new().write_to_file(&doc, &path).unwrap();

    assert_eq!(stats.headings, 1);
    assert_eq!(stats.paragraphs, 1);
    let archive = OoxmlArchive::open(&path).unwrap();
    assert!(archive.contains(DOCUMENT_PART));
}
