//! Structured export: nested-list reconstruction and OpenDocument emission
//!
//! The reconstruction pass turns the editor's flat paragraph sequence back
//! into a nested list/paragraph tree, re-deriving nesting from the literal
//! list prefixes. The odt module serializes that tree into an OpenDocument
//! Text package (mimetype, content.xml, styles.xml, manifest).

mod error;
mod reconstruct;
pub mod odt;

pub use error::*;
pub use reconstruct::*;
