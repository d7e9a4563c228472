//! Relationship parts (`_rels/*.rels`)
//!
//! OOXML packages connect their parts through relationship files that map
//! IDs (`rId1`, ...) to a target path and a relationship type.
//!
//! # Example
//!
//! ```
//! use govdoc_ooxml::Relationships;
//!
//! let mut rels = Relationships::new();
//! let id = rels.add("styles.xml", Relationships::TYPE_STYLES);
//! assert_eq!(id, "rId1");
//! assert!(rels.to_xml().contains(r#"Id="rId1""#));
//! ```

use quick_xml::escape::escape;

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    /// Main document part (document.xml / workbook.xml)
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Core document properties
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Numbering relationship type
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    /// Worksheet relationship type
    pub const TYPE_WORKSHEET: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
}

/// One relationship entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID, e.g. `rId3`
    pub id: String,
    /// Target path, relative to the owning part
    pub target: String,
    /// Relationship type URI
    pub rel_type: String,
}

/// An ordered set of relationships
///
/// Maintains insertion order for deterministic XML serialization.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty relationships set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its generated ID
    pub fn add(&mut self, target: impl Into<String>, rel_type: &str) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            target: target.into(),
            rel_type: rel_type.to_string(),
        });
        id
    }

    /// Serialize relationships to OOXML format
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for rel in &self.entries {
            xml.push_str(&format!(
                "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                escape(rel.id.as_str()),
                escape(rel.rel_type.as_str()),
                escape(rel.target.as_str())
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reading relationships back, for package assertions
#[cfg(test)]
impl Relationships {
    /// Parse relationships from XML bytes
    pub(crate) fn parse(xml: &[u8]) -> crate::error::Result<Self> {
        use quick_xml::events::Event;
        use quick_xml::Reader;

        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let value = attr.unescape_value().ok().map(|s| s.to_string());
                            match attr.key.as_ref() {
                                b"Id" => id = value,
                                b"Target" => target = value,
                                b"Type" => rel_type = value,
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            entries.push(Relationship {
                                id,
                                target,
                                rel_type: rel_type.unwrap_or_default(),
                            });
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(crate::error::OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { entries })
    }

    /// Get the target for a relationship ID
    pub(crate) fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.target.as_str())
    }

    /// Targets of every relationship with the given type, in order
    pub(crate) fn targets_of_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |r| r.rel_type == rel_type)
            .map(|r| r.target.as_str())
    }
}
