//! Document model for the note editor core
//!
//! This crate holds the data the engines operate on: styled runs grouped
//! into paragraphs, the line-addressed note buffer that plays the role of
//! the editing surface, caret/selection coordinates, and the list-line
//! grammar shared by the renumbering engine and the structured exporter.

mod buffer;
mod error;
mod list_line;
mod paragraph;
mod run;
mod selection;

pub use buffer::*;
pub use error::*;
pub use list_line::*;
pub use paragraph::*;
pub use run::*;
pub use selection::*;
