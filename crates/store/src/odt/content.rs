//! content.xml writer
//!
//! Emits the document body (lists, list items, paragraphs, spans) together
//! with the automatic list styles the reconstruction pass interned.

use super::{escape_xml, namespaces};
use crate::{character_style_name, DocNode, ListItem, ListNode, ListStyleDef, ReconstructedDocument};
use doc_model::{ListType, StyledRun};

/// Writer for content.xml
pub struct ContentWriter;

impl ContentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate content.xml for a reconstructed document
    pub fn write(&self, doc: &ReconstructedDocument) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<office:document-content xmlns:office="{}" xmlns:text="{}" xmlns:style="{}" xmlns:fo="{}" office:version="1.2">"#,
            namespaces::OFFICE,
            namespaces::TEXT,
            namespaces::STYLE,
            namespaces::FO,
        ));

        self.write_automatic_styles(&mut xml, &doc.list_styles);

        xml.push_str("<office:body><office:text>");
        for node in &doc.nodes {
            self.write_node(&mut xml, node);
        }
        xml.push_str("</office:text></office:body>");
        xml.push_str("</office:document-content>");
        xml
    }

    /// Write the automatic list styles, one level definition per depth a
    /// style was used at.
    fn write_automatic_styles(&self, xml: &mut String, styles: &[ListStyleDef]) {
        xml.push_str("<office:automatic-styles>");
        for style in styles {
            xml.push_str(&format!(
                r#"<text:list-style style:name="{}">"#,
                escape_xml(&style.name)
            ));
            let mut depths = style.levels.clone();
            depths.sort_unstable();
            for depth in depths {
                self.write_level_style(xml, style, depth);
            }
            xml.push_str("</text:list-style>");
        }
        xml.push_str("</office:automatic-styles>");
    }

    fn write_level_style(&self, xml: &mut String, style: &ListStyleDef, depth: usize) {
        let space_before = (depth.saturating_sub(1)) as f32 * 0.25;
        let properties = format!(
            r#"<style:list-level-properties text:space-before="{}in" text:min-label-width="0.25in"/>"#,
            space_before
        );

        match style.list_type {
            ListType::Bullet => {
                xml.push_str(&format!(
                    r#"<text:list-level-style-bullet text:level="{}" text:bullet-char="{}">"#,
                    depth,
                    escape_xml(&style.marker)
                ));
                xml.push_str(&properties);
                xml.push_str("</text:list-level-style-bullet>");
            }
            ListType::Numbered | ListType::Lettered => {
                xml.push_str(&format!(
                    r#"<text:list-level-style-number text:level="{}" style:num-format="{}" style:num-suffix="{}">"#,
                    depth,
                    escape_xml(&style.marker),
                    escape_xml(&style.punctuation)
                ));
                xml.push_str(&properties);
                xml.push_str("</text:list-level-style-number>");
            }
        }
    }

    fn write_node(&self, xml: &mut String, node: &DocNode) {
        match node {
            DocNode::Paragraph(runs) => self.write_paragraph(xml, runs),
            DocNode::List(list) => self.write_list(xml, list),
        }
    }

    fn write_list(&self, xml: &mut String, list: &ListNode) {
        xml.push_str(&format!(
            r#"<text:list text:style-name="{}">"#,
            escape_xml(&list.style_name)
        ));
        for item in &list.items {
            self.write_list_item(xml, item);
        }
        xml.push_str("</text:list>");
    }

    fn write_list_item(&self, xml: &mut String, item: &ListItem) {
        xml.push_str("<text:list-item>");
        self.write_paragraph(xml, &item.runs);
        for child in &item.children {
            self.write_list(xml, child);
        }
        xml.push_str("</text:list-item>");
    }

    fn write_paragraph(&self, xml: &mut String, runs: &[StyledRun]) {
        if runs.is_empty() {
            xml.push_str("<text:p/>");
            return;
        }
        xml.push_str("<text:p>");
        for run in runs {
            match character_style_name(run) {
                Some(style) => xml.push_str(&format!(
                    r#"<text:span text:style-name="{}">{}</text:span>"#,
                    escape_xml(&style),
                    escape_xml(&run.text)
                )),
                None => xml.push_str(&escape_xml(&run.text)),
            }
        }
        xml.push_str("</text:p>");
    }
}

impl Default for ContentWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct_document;
    use doc_model::Paragraph;

    fn content_for(lines: &[&str]) -> String {
        let paragraphs: Vec<Paragraph> =
            lines.iter().map(|l| Paragraph::from_plain(*l)).collect();
        let doc = reconstruct_document(&paragraphs);
        ContentWriter::new().write(&doc)
    }

    #[test]
    fn test_nested_list_markup() {
        let xml = content_for(&["1. a", "  1. x", "2. b"]);
        assert!(xml.contains(r#"<text:list text:style-name="L1">"#));
        assert!(xml.contains("<text:list-item><text:p>a</text:p>"));
        // The nested list closes inside item "a"'s list-item.
        let a_pos = xml.find("<text:p>a</text:p>").unwrap();
        let x_pos = xml.find("<text:p>x</text:p>").unwrap();
        let b_pos = xml.find("<text:p>b</text:p>").unwrap();
        assert!(a_pos < x_pos && x_pos < b_pos);
        assert!(xml.contains(r#"style:num-format="1""#));
        assert!(xml.contains(r#"style:num-suffix="."#));
        // Both depths defined under the single interned style.
        assert!(xml.contains(r#"text:level="1""#));
        assert!(xml.contains(r#"text:level="2""#));
    }

    #[test]
    fn test_bullet_level_style() {
        let xml = content_for(&["\u{2022} point"]);
        assert!(xml.contains("text:bullet-char=\"\u{2022}\""));
        assert!(xml.contains("<text:list-level-style-bullet"));
    }

    #[test]
    fn test_plain_paragraph_and_escaping() {
        let xml = content_for(&["a < b & c"]);
        assert!(xml.contains("<text:p>a &lt; b &amp; c</text:p>"));
    }

    #[test]
    fn test_styled_span_markup() {
        let para = Paragraph::from_runs(vec![
            doc_model::StyledRun::plain("1. "),
            doc_model::StyledRun::styled("hot", true, false, false, false, false),
        ]);
        let doc = reconstruct_document(&[para]);
        let xml = ContentWriter::new().write(&doc);
        assert!(xml.contains(r#"<text:span text:style-name="Bold">hot</text:span>"#));
    }
}
