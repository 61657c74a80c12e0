//! OpenDocument package assembly
//!
//! An .odt file is a zip archive whose first entry is an uncompressed
//! `mimetype` file; consumers sniff the format from the leading bytes, so
//! the entry order and the Stored compression method are load-bearing.

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use doc_model::Paragraph;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ContentWriter, ManifestWriter, StylesWriter, MIMETYPE};
use crate::{reconstruct_document, Result};

/// Output format for [`export_file_with_fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    OpenDocument,
    PlainText,
}

/// Write an OpenDocument Text package to any seekable sink.
pub fn export_odt<W: Write + Seek>(paragraphs: &[Paragraph], writer: W) -> Result<()> {
    let doc = reconstruct_document(paragraphs);

    let content = ContentWriter::new().write(&doc);
    let styles = StylesWriter::new().write(&doc.character_styles);
    let manifest = ManifestWriter::new().write();

    let mut zip = ZipWriter::new(writer);

    // mimetype must be the first entry and must not be compressed.
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6));
    zip.start_file("content.xml", deflated)?;
    zip.write_all(content.as_bytes())?;
    zip.start_file("styles.xml", deflated)?;
    zip.write_all(styles.as_bytes())?;
    zip.start_file("META-INF/manifest.xml", deflated)?;
    zip.write_all(manifest.as_bytes())?;

    zip.finish()?;
    tracing::debug!(
        nodes = doc.nodes.len(),
        list_styles = doc.list_styles.len(),
        "odt package written"
    );
    Ok(())
}

/// Build the complete .odt package in memory.
pub fn export_odt_bytes(paragraphs: &[Paragraph]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    export_odt(paragraphs, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// Write an .odt package to the given path.
pub fn export_odt_file(paragraphs: &[Paragraph], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    export_odt(paragraphs, file)
}

/// The document as plain text, list prefixes included, one line per paragraph.
pub fn export_plain_text(paragraphs: &[Paragraph]) -> String {
    let mut out = String::new();
    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&para.plain_text());
    }
    out
}

/// Export to `path`, falling back to plain text if package writing fails.
///
/// Returns the format that was actually written.
pub fn export_file_with_fallback(
    paragraphs: &[Paragraph],
    path: &Path,
    format: ExportFormat,
) -> anyhow::Result<ExportFormat> {
    match format {
        ExportFormat::PlainText => {
            std::fs::write(path, export_plain_text(paragraphs))?;
            tracing::info!(path = %path.display(), "exported plain text");
            Ok(ExportFormat::PlainText)
        }
        ExportFormat::OpenDocument => match export_odt_file(paragraphs, path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "exported OpenDocument package");
                Ok(ExportFormat::OpenDocument)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %path.display(),
                    "OpenDocument export failed, writing plain text instead"
                );
                std::fs::write(path, export_plain_text(paragraphs))?;
                Ok(ExportFormat::PlainText)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn paras(lines: &[&str]) -> Vec<Paragraph> {
        lines.iter().map(|l| Paragraph::from_plain(*l)).collect()
    }

    #[test]
    fn test_mimetype_is_first_and_stored() {
        let bytes = export_odt_bytes(&paras(&["1. alpha", "2. beta"])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        let mut contents = String::new();
        first.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, MIMETYPE);
    }

    #[test]
    fn test_package_contains_all_entries() {
        let bytes = export_odt_bytes(&paras(&["hello"])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["mimetype", "content.xml", "styles.xml", "META-INF/manifest.xml"]
        );
    }

    #[test]
    fn test_content_xml_round_trips_text() {
        let bytes = export_odt_bytes(&paras(&["1. alpha", "plain"])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name("content.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.contains("alpha"));
        assert!(content.contains("plain"));
        assert!(content.contains("<text:list"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.odt");
        export_odt_file(&paras(&["- item"]), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // Zip magic plus the uncompressed mimetype near the head of the file.
        assert_eq!(&bytes[0..2], b"PK");
        assert!(bytes
            .windows(MIMETYPE.len())
            .any(|w| w == MIMETYPE.as_bytes()));
    }

    #[test]
    fn test_plain_text_fallback_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let written =
            export_file_with_fallback(&paras(&["1. a", "2. b"]), &path, ExportFormat::PlainText)
                .unwrap();
        assert_eq!(written, ExportFormat::PlainText);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1. a\n2. b");
    }
}
