//! Live list renumbering
//!
//! One top-to-bottom pass over the buffer's lines after each text change.
//! Consecutive list lines of the same type, indent level, and letter case
//! form a block; each block's markers are re-derived from a per-level
//! sequence counter. A level's counter survives a nested sub-list and
//! resumes when the outer level reappears, so
//!
//! ```text
//! 1. a
//!   1. x
//!   2. y
//! 2. b
//! ```
//!
//! keeps the outer `2.` instead of restarting at `1.` or jumping to `3.`.
//!
//! The pass mutates only the exact character range of a line's existing
//! prefix, and only when the computed prefix differs, so undo history and
//! selection anchors are perturbed as little as possible.

use crate::Result;
use doc_model::{
    build_letter_marker, build_prefix, parse_list_line, ListType, NoteBuffer, ParsedListLine,
    SelectionSnapshot,
};

/// Per-indent-level numbering memory, alive for one pass only.
#[derive(Debug, Clone)]
struct ListLevelState {
    list_type: ListType,
    uppercase_letters: bool,
    item_count: usize,
}

impl ListLevelState {
    fn matches(&self, parsed: &ParsedListLine) -> bool {
        self.list_type == parsed.list_type
            && (parsed.list_type != ListType::Lettered
                || self.uppercase_letters == parsed.is_uppercase_letter)
    }
}

/// The renumbering engine.
///
/// Invoked from the buffer's text-change notification. Because its own
/// mutations re-raise that notification, the engine carries a single-flight
/// flag: invocations while a pass is in flight are no-ops. This is a
/// cooperative single-threaded guard, not a lock.
#[derive(Debug, Default)]
pub struct Renumberer {
    in_flight: bool,
}

impl Renumberer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a text-change notification.
    ///
    /// Returns the number of lines whose prefix was rewritten. Nested
    /// invocations during a pass return 0 without touching the buffer.
    pub fn on_text_changed(&mut self, buffer: &mut NoteBuffer) -> usize {
        if self.in_flight {
            return 0;
        }
        self.in_flight = true;
        let rewritten = match self.renumber_pass(buffer) {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(error = %err, "renumber pass aborted");
                0
            }
        };
        self.in_flight = false;
        tracing::debug!(lines_rewritten = rewritten, "renumber pass complete");
        rewritten
    }

    fn renumber_pass(&mut self, buffer: &mut NoteBuffer) -> Result<usize> {
        let snapshot = SelectionSnapshot::capture(buffer);
        // Level memory as a growable array indexed by indent level.
        let mut levels: Vec<Option<ListLevelState>> = Vec::new();
        let mut rewritten = 0;

        let mut i = 0;
        while i < buffer.line_count() {
            let parsed = buffer.line(i).and_then(parse_list_line);
            let Some(parsed) = parsed else {
                i += 1;
                continue;
            };
            // Bullets carry no sequence and are never renumbered.
            if parsed.list_type == ListType::Bullet {
                i += 1;
                continue;
            }

            // Ascending back out of a nested sub-list invalidates the
            // sub-list's numbering memory.
            if levels.len() > parsed.indent_level + 1 {
                levels.truncate(parsed.indent_level + 1);
            }

            // Collect the maximal block of same-(type, level, case) lines.
            let mut block = vec![parsed];
            while let Some(next) = buffer.line(i + block.len()).and_then(parse_list_line) {
                let head = &block[0];
                let same = next.list_type == head.list_type
                    && next.indent_level == head.indent_level
                    && (next.list_type != ListType::Lettered
                        || next.is_uppercase_letter == head.is_uppercase_letter);
                if !same {
                    break;
                }
                block.push(next);
            }

            let level = block[0].indent_level;
            if levels.len() <= level {
                levels.resize_with(level + 1, || None);
            }

            // Resume from the level's stored count when type and case still
            // match; otherwise this block starts a fresh sequence.
            let start = match &levels[level] {
                Some(state) if state.matches(&block[0]) => state.item_count,
                _ => 0,
            };

            for (offset, entry) in block.iter().enumerate() {
                let marker = match entry.list_type {
                    ListType::Numbered => (start + offset + 1).to_string(),
                    ListType::Lettered => {
                        build_letter_marker(start + offset, entry.is_uppercase_letter)
                    }
                    // Blocks are seeded from a non-bullet head and never mix
                    // types, so this arm is never taken.
                    ListType::Bullet => continue,
                };
                let target =
                    build_prefix(&entry.indent_text, &marker, &entry.punctuation, &entry.spacing);
                let existing = entry.prefix();
                if target != existing {
                    buffer.replace_in_line(
                        i + offset,
                        0,
                        existing.chars().count(),
                        &target,
                    )?;
                    rewritten += 1;
                }
            }

            let block_len = block.len();
            levels[level] = Some(ListLevelState {
                list_type: block[0].list_type,
                uppercase_letters: block[0].is_uppercase_letter,
                item_count: start + block_len,
            });
            i += block_len;
        }

        snapshot.restore(buffer);
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{CaretPosition, Selection};

    fn renumbered(text: &str) -> String {
        let mut buffer = NoteBuffer::from_text(text);
        Renumberer::new().on_text_changed(&mut buffer);
        buffer.to_text()
    }

    #[test]
    fn test_basic_sequence_normalized() {
        assert_eq!(renumbered("3. a\n7. b\n99. c\n"), "1. a\n2. b\n3. c\n");
    }

    #[test]
    fn test_identical_prefixes_left_untouched() {
        let mut buffer = NoteBuffer::from_text("1. a\n2. b\n");
        let revision = buffer.revision();
        let rewritten = Renumberer::new().on_text_changed(&mut buffer);
        assert_eq!(rewritten, 0);
        assert_eq!(buffer.revision(), revision);
    }

    #[test]
    fn test_nested_list_resumes_outer_sequence() {
        let text = "1. a\n  1. x\n  2. y\n2. b\n";
        assert_eq!(renumbered(text), text);
    }

    #[test]
    fn test_nested_memory_evicted_on_ascent() {
        // Returning to the inner level after ascending restarts it at 1.
        let text = "1. a\n  9. x\n2. b\n  9. y\n";
        assert_eq!(renumbered(text), "1. a\n  1. x\n2. b\n  1. y\n");
    }

    #[test]
    fn test_lettered_blocks_and_case_split() {
        // Case change breaks the block and restarts the sequence.
        assert_eq!(
            renumbered("a) one\nb) two\nB) three\nC) four\n"),
            "a) one\nb) two\nA) three\nB) four\n"
        );
    }

    #[test]
    fn test_letter_clamp_at_z() {
        let input: String = (0..30).map(|i| format!("a. item{}\n", i)).collect();
        let mut buffer = NoteBuffer::from_text(&input);
        Renumberer::new().on_text_changed(&mut buffer);

        assert_eq!(buffer.line(0), Some("a. item0"));
        assert_eq!(buffer.line(24), Some("y. item24"));
        // Items 26-30 all clamp to z, never aa.
        for i in 25..30 {
            assert!(buffer.line(i).unwrap().starts_with("z. "), "line {}", i);
        }
    }

    #[test]
    fn test_bullets_never_renumbered() {
        let text = "\u{2022} one\n\u{2022} two\n- three\n";
        assert_eq!(renumbered(text), text);
    }

    #[test]
    fn test_type_change_at_same_level_restarts() {
        assert_eq!(
            renumbered("1. a\na) x\n5. b\n"),
            "1. a\na) x\n1. b\n"
        );
    }

    #[test]
    fn test_idempotence() {
        let messy = "4. a\n  7. x\nplain\n9. b\n  c) l\n  d) m\n\u{2022} bullet\n";
        let once = renumbered(messy);
        assert_eq!(renumbered(&once), once);
    }

    #[test]
    fn test_empty_and_plain_documents_are_noops() {
        assert_eq!(renumbered(""), "");
        assert_eq!(renumbered("just\nsome\ntext\n"), "just\nsome\ntext\n");
    }

    #[test]
    fn test_selection_preserved_across_insertion() {
        let mut buffer =
            NoteBuffer::from_text("1. alpha\n2. beta\n3. gamma\n4. delta\n5. epsilon\n");
        // Simulate the editor inserting a new item above the third line.
        buffer.insert_line(1, "1. inserted").unwrap();
        // "3. gamma" now sits on line 3; select "ga" inside its content.
        buffer.set_selection(Selection::new(
            CaretPosition::new(3, 3),
            CaretPosition::new(3, 5),
        ));

        Renumberer::new().on_text_changed(&mut buffer);

        assert_eq!(buffer.line(3), Some("4. gamma"));
        // A document-absolute offset would now be stale; (line, column)
        // relocation still covers the same logical characters.
        let sel = buffer.selection();
        assert_eq!(sel.start(), CaretPosition::new(3, 3));
        assert_eq!(sel.end(), CaretPosition::new(3, 5));
        let line = buffer.line(3).unwrap();
        let selected: String = line.chars().skip(3).take(2).collect();
        assert_eq!(selected, "ga");
    }

    #[test]
    fn test_caret_clamped_when_prefix_shrinks() {
        let mut buffer = NoteBuffer::from_text("10. a\n11. b\n");
        buffer.set_caret(CaretPosition::new(0, 5));
        Renumberer::new().on_text_changed(&mut buffer);

        assert_eq!(buffer.line(0), Some("1. a"));
        assert_eq!(buffer.caret(), CaretPosition::new(0, 4));
    }

    proptest::proptest! {
        /// Running the pass twice always matches running it once.
        #[test]
        fn prop_renumber_idempotent(
            lines in proptest::collection::vec("( {0,4})?([0-9]{1,2}[.)]|[a-dA-D][.)]|[-*])? ?[a-z]{0,8}", 0..12)
        ) {
            let text = lines.join("\n");
            let once = renumbered(&text);
            proptest::prop_assert_eq!(renumbered(&once), once);
        }
    }

    #[test]
    fn test_reentrant_invocation_is_noop() {
        let mut engine = Renumberer::new();
        engine.in_flight = true;

        let mut buffer = NoteBuffer::from_text("5. a\n9. b\n");
        let rewritten = engine.on_text_changed(&mut buffer);
        assert_eq!(rewritten, 0);
        assert_eq!(buffer.to_text(), "5. a\n9. b\n");

        // Once the pass is no longer in flight, the next notification runs.
        engine.in_flight = false;
        assert_eq!(engine.on_text_changed(&mut buffer), 2);
        assert_eq!(buffer.to_text(), "1. a\n2. b\n");
    }
}
