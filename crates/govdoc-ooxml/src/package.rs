//! Package-level parts shared by DOCX and XLSX
//!
//! `[Content_Types].xml` declares the MIME type of every part and
//! `docProps/core.xml` carries the document title and creator.

use quick_xml::escape::escape;

use crate::archive::{OoxmlArchive, CONTENT_TYPES_PATH};
use crate::relationships::Relationships;

/// Content type of relationship parts
pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
/// Content type of core properties
pub const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// Path of the core properties part
pub const CORE_PROPERTIES_PATH: &str = "docProps/core.xml";

/// Name written as `dc:creator`
pub const CREATOR: &str = "govdoc";

/// Builder for `[Content_Types].xml`
#[derive(Debug, Clone)]
pub struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), CT_RELATIONSHIPS.to_string()),
                ("xml".to_string(), "application/xml".to_string()),
            ],
            overrides: Vec::new(),
        }
    }
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the content type of one part (path without leading slash)
    pub fn add_override(&mut self, part: impl Into<String>, content_type: impl Into<String>) {
        self.overrides.push((part.into(), content_type.into()));
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push('\n');
        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                escape(ext.as_str()),
                escape(ct.as_str())
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                "  <Override PartName=\"/{}\" ContentType=\"{}\"/>\n",
                escape(part.as_str()),
                escape(ct.as_str())
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

/// Generate `docProps/core.xml`
pub fn core_properties_xml(title: Option<&str>) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#);
    xml.push_str(r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#);
    xml.push_str(r#"xmlns:dcterms="http://purl.org/dc/terms/" "#);
    xml.push_str(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    xml.push('\n');
    if let Some(title) = title {
        xml.push_str(&format!("  <dc:title>{}</dc:title>\n", escape(title)));
    }
    xml.push_str(&format!("  <dc:creator>{}</dc:creator>\n", CREATOR));
    xml.push_str("</cp:coreProperties>");
    xml
}

/// Write the package skeleton: content types, root relationships and core properties
///
/// `main_part` is the path of the main document part, `main_type` its content type.
pub(crate) fn write_package_parts(
    archive: &mut OoxmlArchive,
    mut content_types: ContentTypes,
    main_part: &str,
    main_type: &str,
    title: Option<&str>,
) {
    content_types.add_override(main_part, main_type);
    content_types.add_override(CORE_PROPERTIES_PATH, CT_CORE_PROPERTIES);

    let mut root_rels = Relationships::new();
    root_rels.add(main_part, Relationships::TYPE_OFFICE_DOCUMENT);
    root_rels.add(CORE_PROPERTIES_PATH, Relationships::TYPE_CORE_PROPERTIES);

    archive.set_string(CONTENT_TYPES_PATH, content_types.to_xml());
    archive.set_string("_rels/.rels", root_rels.to_xml());
    archive.set_string(CORE_PROPERTIES_PATH, core_properties_xml(title));
}
