//! Caret and selection coordinates
//!
//! Positions are addressed by (line, column): a line index counts
//! line-start boundaries from the top of the document, a column counts
//! characters from that line's start. Snapshots are captured immediately
//! before a batch mutation and re-resolved immediately after; they never
//! hold references into the buffer itself.

use crate::NoteBuffer;
use serde::{Deserialize, Serialize};

/// A caret position addressed by (line, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct CaretPosition {
    /// Count of line-start boundaries from document start
    pub line: usize,
    /// Character count from the line's start
    pub column: usize,
}

impl CaretPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A selection with an anchor (where it started) and a focus (the caret).
///
/// When anchor == focus the selection is collapsed (just a caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Selection {
    /// Where the selection started
    pub anchor: CaretPosition,
    /// Where the selection ends (caret position)
    pub focus: CaretPosition,
}

impl Selection {
    pub fn new(anchor: CaretPosition, focus: CaretPosition) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection (caret only)
    pub fn collapsed(position: CaretPosition) -> Self {
        Self {
            anchor: position,
            focus: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Start position regardless of selection direction
    pub fn start(&self) -> CaretPosition {
        self.anchor.min(self.focus)
    }

    /// End position regardless of selection direction
    pub fn end(&self) -> CaretPosition {
        self.anchor.max(self.focus)
    }
}

/// A selection captured by coordinates across one batch mutation.
///
/// Captured against the pre-mutation line table and restored against the
/// post-mutation one; columns that no longer fit clamp to the new line end.
/// Never stored beyond one mutation's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub start: CaretPosition,
    pub end: CaretPosition,
    pub caret: CaretPosition,
    pub is_empty: bool,
}

impl SelectionSnapshot {
    /// Capture the buffer's current selection and caret
    pub fn capture(buffer: &NoteBuffer) -> Self {
        let selection = buffer.selection();
        Self {
            start: selection.start(),
            end: selection.end(),
            caret: selection.focus,
            is_empty: selection.is_collapsed(),
        }
    }

    /// Re-resolve the captured coordinates against the buffer's current
    /// line table and write them back.
    pub fn restore(&self, buffer: &mut NoteBuffer) {
        let start = buffer.clamp_position(self.start);
        let caret = buffer.clamp_position(self.caret);
        if self.is_empty {
            buffer.set_selection(Selection::collapsed(caret));
        } else {
            let end = buffer.clamp_position(self.end);
            // Keep the caret at whichever end it was on.
            if self.caret == self.start {
                buffer.set_selection(Selection::new(end, start));
            } else {
                buffer.set_selection(Selection::new(start, end));
            }
        }
    }
}
