//! Note buffer - the line-addressed editing surface
//!
//! `NoteBuffer` plays the role of the rich-text widget the engines sit
//! behind: an ordered sequence of line texts with stable line-start/line-end
//! addressing, character-range replacement, and a caret/selection addressed
//! by (line, column). Every mutation bumps a revision counter, which is the
//! change notification the renumbering engine hangs off.

use crate::{CaretPosition, DocModelError, Result, Selection};
use serde::{Deserialize, Serialize};

/// A line-addressed text buffer with a caret and selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NoteBuffer {
    /// Lines without terminators, in document order
    lines: Vec<String>,
    /// Whether the source text ended with a newline
    trailing_newline: bool,
    selection: Selection,
    /// Bumped on every text mutation; the change-notification signal
    revision: u64,
}

impl NoteBuffer {
    /// Create an empty buffer with a single empty line
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            trailing_newline: false,
            selection: Selection::default(),
            revision: 0,
        }
    }

    /// Create a buffer from plain text
    pub fn from_text(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let mut lines: Vec<String> = text.split('\n').map(|l| l.to_string()).collect();
        if trailing_newline {
            // split produces a trailing empty segment after the final '\n'
            lines.pop();
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            trailing_newline,
            selection: Selection::default(),
            revision: 0,
        }
    }

    /// Reassemble the buffer's full text
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// Number of lines in the buffer
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The text of a line, without its terminator
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.as_str())
    }

    /// Iterate over line texts in document order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.as_str())
    }

    /// Length of a line in characters
    pub fn line_char_len(&self, index: usize) -> Option<usize> {
        self.lines.get(index).map(|l| l.chars().count())
    }

    /// The revision counter; bumped once per text mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the character range `[start_col, end_col)` on a line.
    ///
    /// Columns are character offsets from the line start; the replacement
    /// never touches characters outside the range, so styling attached to
    /// surrounding characters is undisturbed in the backing widget.
    pub fn replace_in_line(
        &mut self,
        line: usize,
        start_col: usize,
        end_col: usize,
        replacement: &str,
    ) -> Result<()> {
        let text = self
            .lines
            .get_mut(line)
            .ok_or(DocModelError::LineOutOfRange(line))?;

        let char_len = text.chars().count();
        if start_col > end_col || end_col > char_len {
            return Err(DocModelError::ColumnOutOfRange {
                line,
                column: end_col,
            });
        }

        let start_byte = char_to_byte(text, start_col);
        let end_byte = char_to_byte(text, end_col);
        text.replace_range(start_byte..end_byte, replacement);
        self.revision += 1;
        Ok(())
    }

    /// Insert a new line before `index` (or at the end when `index` equals
    /// the line count)
    pub fn insert_line(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        if index > self.lines.len() {
            return Err(DocModelError::LineOutOfRange(index));
        }
        self.lines.insert(index, text.into());
        self.revision += 1;
        Ok(())
    }

    /// Remove a line entirely
    pub fn remove_line(&mut self, index: usize) -> Result<String> {
        if index >= self.lines.len() {
            return Err(DocModelError::LineOutOfRange(index));
        }
        let removed = self.lines.remove(index);
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.revision += 1;
        Ok(removed)
    }

    /// The current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamping both ends to valid positions
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection::new(
            self.clamp_position(selection.anchor),
            self.clamp_position(selection.focus),
        );
    }

    /// The caret (the selection's focus)
    pub fn caret(&self) -> CaretPosition {
        self.selection.focus
    }

    /// Collapse the selection to a caret position
    pub fn set_caret(&mut self, position: CaretPosition) {
        let clamped = self.clamp_position(position);
        self.selection = Selection::collapsed(clamped);
    }

    /// Clamp a position to the current line table: the line index to the
    /// last line, the column to that line's character length.
    pub fn clamp_position(&self, position: CaretPosition) -> CaretPosition {
        let line = position.line.min(self.lines.len().saturating_sub(1));
        let max_col = self.lines[line].chars().count();
        CaretPosition::new(line, position.column.min(max_col))
    }
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
