//! Paragraph - an ordered sequence of styled runs

use crate::StyledRun;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParagraphId(Uuid);

impl ParagraphId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParagraphId {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered sequence of styled runs.
///
/// Concatenating the run texts yields the paragraph's plain text; that plain
/// text is what the list grammar inspects when deciding whether the
/// paragraph is a list item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    id: ParagraphId,
    /// The runs making up this paragraph, in document order
    pub runs: Vec<StyledRun>,
}

impl Paragraph {
    /// Create an empty paragraph
    pub fn new() -> Self {
        Self {
            id: ParagraphId::new(),
            runs: Vec::new(),
        }
    }

    /// Create a paragraph from a sequence of runs
    pub fn from_runs(runs: Vec<StyledRun>) -> Self {
        Self {
            id: ParagraphId::new(),
            runs,
        }
    }

    /// Create a paragraph holding a single unstyled run
    pub fn from_plain(text: impl Into<String>) -> Self {
        Self::from_runs(vec![StyledRun::plain(text)])
    }

    pub fn id(&self) -> ParagraphId {
        self.id
    }

    /// The concatenation of all run texts
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Total length in characters across all runs
    pub fn char_count(&self) -> usize {
        self.runs.iter().map(|r| r.char_count()).sum()
    }

    /// Check if the paragraph has no text at all
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.is_empty())
    }

    /// Split the run sequence at a character offset and return the tail.
    ///
    /// The returned runs carry the text from `char_offset` onward with the
    /// original styling intact; a run straddling the offset is cut in two
    /// and only its tail kept. Used by the structured exporter to drop a
    /// recognized list prefix while preserving content styling.
    pub fn split_runs_at(&self, char_offset: usize) -> Vec<StyledRun> {
        let mut remaining = char_offset;
        let mut tail = Vec::new();

        for run in &self.runs {
            let len = run.char_count();
            if remaining >= len {
                remaining -= len;
                continue;
            }
            if remaining == 0 {
                if !run.is_empty() {
                    tail.push(run.clone());
                }
            } else {
                let byte_off = run
                    .text
                    .char_indices()
                    .nth(remaining)
                    .map(|(i, _)| i)
                    .unwrap_or(run.text.len());
                tail.push(run.with_text(&run.text[byte_off..]));
                remaining = 0;
            }
        }

        tail
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_concatenation() {
        let para = Paragraph::from_runs(vec![
            StyledRun::plain("1. "),
            StyledRun::styled("bold", true, false, false, false, false),
            StyledRun::plain(" tail"),
        ]);
        assert_eq!(para.plain_text(), "1. bold tail");
        assert_eq!(para.char_count(), 12);
    }

    #[test]
    fn test_split_runs_at_run_boundary() {
        let para = Paragraph::from_runs(vec![
            StyledRun::plain("1. "),
            StyledRun::styled("bold", true, false, false, false, false),
        ]);
        let tail = para.split_runs_at(3);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].text, "bold");
        assert!(tail[0].bold);
    }

    #[test]
    fn test_split_runs_mid_run() {
        let para = Paragraph::from_runs(vec![StyledRun::styled(
            "1. content",
            false,
            true,
            false,
            false,
            false,
        )]);
        let tail = para.split_runs_at(3);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].text, "content");
        assert!(tail[0].italic);
    }

    #[test]
    fn test_split_past_end_is_empty() {
        let para = Paragraph::from_plain("ab");
        assert!(para.split_runs_at(5).is_empty());
    }
}
