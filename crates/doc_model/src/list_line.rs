//! List-line grammar
//!
//! Recognizes the literal textual prefix of a list line:
//! leading whitespace, then a marker (digits, a single letter, or a bullet
//! glyph), punctuation (`.` or `)`) for numbered/lettered markers, one or
//! more spacing characters, then the content. The parse is a hand-written
//! scanner, not a pattern, so the exact-reconstruction invariant
//! (`indent + marker + punctuation + spacing + content + line_break ==
//! original line`) is easy to uphold and verify.

use serde::{Deserialize, Serialize};

/// Number of leading spaces that make up one indent level
pub const INDENT_SPACES_PER_LEVEL: usize = 2;

/// Bullet glyphs recognized as list markers
pub const BULLET_CHARS: &[char] = &['\u{2022}', '\u{25E6}', '\u{25AA}', '\u{2023}', '-', '*'];

/// The kind of marker a list line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    /// Decimal numbers: 1, 2, 3, ...
    Numbered,
    /// Single letters: a, b, c, ... (or A, B, C, ...)
    Lettered,
    /// A bullet glyph; bullets carry no sequence and are never renumbered
    Bullet,
}

/// The decomposed prefix and content of a recognized list line.
///
/// Derived on demand from a line's plain text, never stored. All fields are
/// the literal substrings of the original line, so concatenating them in
/// order reproduces the line exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedListLine {
    /// The leading whitespace run (may be empty)
    pub indent_text: String,
    /// The marker glyph(s): digits, one letter, or one bullet character
    pub marker: String,
    /// `.` or `)` after a numbered/lettered marker; empty for bullets
    pub punctuation: String,
    /// One or more spaces/tabs separating the prefix from the content
    pub spacing: String,
    /// The trailing line terminator, if the line carried one
    pub line_break: String,
    /// Everything between the spacing and the line terminator
    pub content: String,
    /// Which marker family matched
    pub list_type: ListType,
    /// For lettered markers, whether the letter is uppercase
    pub is_uppercase_letter: bool,
    /// `floor(indent_len / INDENT_SPACES_PER_LEVEL)`
    pub indent_level: usize,
}

impl ParsedListLine {
    /// The full prefix: indent + marker + punctuation + spacing
    pub fn prefix(&self) -> String {
        build_prefix(&self.indent_text, &self.marker, &self.punctuation, &self.spacing)
    }

    /// Length of the prefix in characters
    pub fn prefix_char_len(&self) -> usize {
        self.indent_text.chars().count()
            + self.marker.chars().count()
            + self.punctuation.chars().count()
            + self.spacing.chars().count()
    }

    /// Reassemble the original line text
    pub fn reconstruct(&self) -> String {
        let mut line = self.prefix();
        line.push_str(&self.content);
        line.push_str(&self.line_break);
        line
    }
}

/// Strip and return the trailing line terminator, if any
fn split_line_break(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\r') {
        (body, &line[body.len()..])
    } else {
        (line, "")
    }
}

fn is_spacing(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Parse a line of plain text as a list line.
///
/// Returns `None` when the line does not match the grammar: no recognized
/// marker, missing punctuation after a numbered/lettered marker, or no
/// spacing between the prefix and the content (a bare `1.` at end of line
/// is not a list line).
pub fn parse_list_line(line: &str) -> Option<ParsedListLine> {
    let (body, line_break) = split_line_break(line);

    // Leading whitespace run
    let indent_end = body
        .char_indices()
        .find(|&(_, c)| !is_spacing(c))
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    let indent_text = &body[..indent_end];
    let rest = &body[indent_end..];

    let first = rest.chars().next()?;

    let (list_type, marker_end, is_uppercase_letter) = if first.is_ascii_digit() {
        let end = rest
            .char_indices()
            .find(|&(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        (ListType::Numbered, end, false)
    } else if first.is_ascii_alphabetic() {
        (ListType::Lettered, first.len_utf8(), first.is_ascii_uppercase())
    } else if BULLET_CHARS.contains(&first) {
        (ListType::Bullet, first.len_utf8(), false)
    } else {
        return None;
    };

    let marker = &rest[..marker_end];
    let after_marker = &rest[marker_end..];

    // Numbered and lettered markers require `.` or `)`; bullets take none.
    let (punctuation, after_punct) = match list_type {
        ListType::Bullet => ("", after_marker),
        _ => {
            let p = after_marker.chars().next()?;
            if p != '.' && p != ')' {
                return None;
            }
            after_marker.split_at(p.len_utf8())
        }
    };

    // One or more spacing characters are required for every list type.
    let spacing_end = after_punct
        .char_indices()
        .find(|&(_, c)| !is_spacing(c))
        .map(|(i, _)| i)
        .unwrap_or(after_punct.len());
    if spacing_end == 0 {
        return None;
    }
    let (spacing, content) = after_punct.split_at(spacing_end);

    Some(ParsedListLine {
        indent_text: indent_text.to_string(),
        marker: marker.to_string(),
        punctuation: punctuation.to_string(),
        spacing: spacing.to_string(),
        line_break: line_break.to_string(),
        content: content.to_string(),
        list_type,
        is_uppercase_letter,
        indent_level: indent_text.chars().count() / INDENT_SPACES_PER_LEVEL,
    })
}

/// Concatenate the prefix parts of a list line
pub fn build_prefix(indent_text: &str, marker: &str, punctuation: &str, spacing: &str) -> String {
    let mut prefix =
        String::with_capacity(indent_text.len() + marker.len() + punctuation.len() + spacing.len());
    prefix.push_str(indent_text);
    prefix.push_str(marker);
    prefix.push_str(punctuation);
    prefix.push_str(spacing);
    prefix
}

/// Map a zero-based sequence index to a single-letter marker.
///
/// Indices beyond 25 clamp to `z`/`Z` rather than rolling over to
/// multi-letter markers; that boundary is policy, not an error.
pub fn build_letter_marker(index: usize, uppercase: bool) -> String {
    let clamped = index.min(25) as u8;
    let base = if uppercase { b'A' } else { b'a' };
    ((base + clamped) as char).to_string()
}

/// Check whether a line matches the list grammar
pub fn is_list_line(line: &str) -> bool {
    parse_list_line(line).is_some()
}

/// Indent level derived from a line's leading whitespace
pub fn get_indent_level(line: &str) -> usize {
    let (body, _) = split_line_break(line);
    let leading = body.chars().take_while(|&c| is_spacing(c)).count();
    leading / INDENT_SPACES_PER_LEVEL
}

/// Rewrite only the leading whitespace run to `new_level` indent levels.
///
/// Marker, punctuation, spacing, and content are left untouched.
pub fn set_indent_level(line: &str, new_level: usize) -> String {
    let (body, line_break) = split_line_break(line);
    let indent_end = body
        .char_indices()
        .find(|&(_, c)| !is_spacing(c))
        .map(|(i, _)| i)
        .unwrap_or(body.len());

    let mut result = " ".repeat(new_level * INDENT_SPACES_PER_LEVEL);
    result.push_str(&body[indent_end..]);
    result.push_str(line_break);
    result
}

/// Strip only the trailing line terminator; interior whitespace is untouched
pub fn normalize_line(line: &str) -> &str {
    split_line_break(line).0
}
