//! ODT Export Module
//!
//! Serializes a reconstructed document into an OpenDocument Text (ODT)
//! package. ODT is the native format of LibreOffice Writer and an OASIS
//! open standard.
//!
//! ## Package structure
//!
//! An ODT file is a ZIP archive containing:
//! - `mimetype` - the package media type, stored first and uncompressed
//! - `content.xml` - document content and automatic list styles
//! - `styles.xml` - named character styles
//! - `META-INF/manifest.xml` - package manifest
//!
//! ## Note
//!
//! This module emits ODT only; reading third-party packages is out of
//! scope.

mod content;
mod package;
mod styles;

pub use content::ContentWriter;
pub use package::{
    export_file_with_fallback, export_odt, export_odt_bytes, export_odt_file, export_plain_text,
    ExportFormat,
};
pub use styles::{ManifestWriter, StylesWriter};

/// The ODT package media type
pub const MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

/// ODF XML namespaces
pub mod namespaces {
    /// Office namespace
    pub const OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
    /// Text namespace
    pub const TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
    /// Style namespace
    pub const STYLE: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
    /// FO (Formatting Objects) namespace
    pub const FO: &str = "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0";
    /// Manifest namespace
    pub const MANIFEST: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";
}

/// Escape text for XML element content and attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
