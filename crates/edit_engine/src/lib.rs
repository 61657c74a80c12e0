//! Edit engine - keeps list prefixes consistent as the user edits
//!
//! The renumbering engine walks the buffer's lines after every text change,
//! re-deriving numbered and lettered markers while leaving bullets and plain
//! text alone, and restores the caret/selection across its own mutations.

mod error;
mod renumber;

pub use error::*;
pub use renumber::*;
