//! Layout engine - line wrapping and pagination for fixed-layout export
//!
//! Wraps a paragraph's styled runs into width-constrained lines and flows
//! the wrapped lines onto pages of positioned spans, ready for a PDF-writing
//! collaborator. All measurement goes through an injected font resolver so
//! the output is deterministic for a given resolver.

mod font;
mod paginate;
mod wrap;

pub use font::*;
pub use paginate::*;
pub use wrap::*;
