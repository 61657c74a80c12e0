//! styles.xml and manifest writers
//!
//! styles.xml names one character style per distinct flag combination the
//! document uses; the manifest lists the package entries.

use super::{escape_xml, namespaces, MIMETYPE};
use crate::CharacterStyleDef;

/// Writer for styles.xml
pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml for the document's character styles
    pub fn write(&self, character_styles: &[CharacterStyleDef]) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<office:document-styles xmlns:office="{}" xmlns:style="{}" xmlns:fo="{}" office:version="1.2">"#,
            namespaces::OFFICE,
            namespaces::STYLE,
            namespaces::FO,
        ));
        xml.push_str("<office:styles>");

        // The paragraph base everything hangs off.
        xml.push_str(
            r#"<style:style style:name="Standard" style:family="paragraph" style:class="text"/>"#,
        );

        for style in character_styles {
            self.write_character_style(&mut xml, style);
        }

        xml.push_str("</office:styles>");
        xml.push_str("</office:document-styles>");
        xml
    }

    fn write_character_style(&self, xml: &mut String, style: &CharacterStyleDef) {
        xml.push_str(&format!(
            r#"<style:style style:name="{}" style:family="text"><style:text-properties"#,
            escape_xml(&style.name)
        ));
        if style.monospaced {
            xml.push_str(r#" fo:font-family="Courier New""#);
        }
        if style.bold {
            xml.push_str(r#" fo:font-weight="bold""#);
        }
        if style.italic {
            xml.push_str(r#" fo:font-style="italic""#);
        }
        if style.underline {
            xml.push_str(r#" style:text-underline-style="solid" style:text-underline-width="auto""#);
        }
        if style.strikethrough {
            xml.push_str(r#" style:text-line-through-style="solid""#);
        }
        xml.push_str("/></style:style>");
    }
}

impl Default for StylesWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer for META-INF/manifest.xml
pub struct ManifestWriter;

impl ManifestWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate the package manifest
    pub fn write(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<manifest:manifest xmlns:manifest="{}" manifest:version="1.2">"#,
            namespaces::MANIFEST
        ));
        xml.push_str(&format!(
            r#"<manifest:file-entry manifest:full-path="/" manifest:media-type="{}"/>"#,
            MIMETYPE
        ));
        for entry in ["content.xml", "styles.xml"] {
            xml.push_str(&format!(
                r#"<manifest:file-entry manifest:full-path="{}" manifest:media-type="text/xml"/>"#,
                entry
            ));
        }
        xml.push_str("</manifest:manifest>");
        xml
    }
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}
