//! Styled run - a contiguous span of text with one formatting state

use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing one formatting state.
///
/// Runs are immutable values owned by a [`Paragraph`](crate::Paragraph).
/// Adjacent runs with identical styling may be merged by consumers but the
/// model never requires it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content of this run
    pub text: String,
    /// Bold flag
    pub bold: bool,
    /// Italic flag
    pub italic: bool,
    /// Underline flag
    pub underline: bool,
    /// Strikethrough flag
    pub strikethrough: bool,
    /// Monospaced (code) flag
    pub monospaced: bool,
}

impl StyledRun {
    /// Create a plain (unstyled) run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            monospaced: false,
        }
    }

    /// Create a run with explicit style flags
    pub fn styled(
        text: impl Into<String>,
        bold: bool,
        italic: bool,
        underline: bool,
        strikethrough: bool,
        monospaced: bool,
    ) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            underline,
            strikethrough,
            monospaced,
        }
    }

    /// Check whether two runs carry identical styling (ignoring text)
    pub fn same_style(&self, other: &StyledRun) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.strikethrough == other.strikethrough
            && self.monospaced == other.monospaced
    }

    /// A copy of this run carrying different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Length of the text in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of grapheme clusters in this run
    pub fn grapheme_count(&self) -> usize {
        use unicode_segmentation::UnicodeSegmentation;
        self.text.graphemes(true).count()
    }

    /// Check if this run is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
