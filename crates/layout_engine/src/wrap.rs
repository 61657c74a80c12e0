//! Greedy line wrapping over styled runs
//!
//! Run text is normalized (`\r\n`/`\r` become `\n`), split at hard breaks,
//! and tokenized into alternating whitespace/non-whitespace spans. Tokens
//! fill lines greedily; a token that cannot fit even alone on an empty line
//! is force-split at grapheme boundaries so no input is ever truncated.
//! Fit checks measure whole prefixes through the font, never summed
//! per-character widths.

use crate::{Font, FontResolver};
use doc_model::Paragraph;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A span of text drawn in one font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpan {
    pub text: String,
    pub font: Font,
}

/// One wrapped line: an ordered list of spans
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WrappedLine {
    pub spans: Vec<LineSpan>,
}

impl WrappedLine {
    /// Concatenation of the span texts
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// The tallest span font's height, if the line has any spans
    pub fn max_font_height(&self) -> Option<f32> {
        self.spans
            .iter()
            .map(|s| s.font.height())
            .fold(None, |acc, h| Some(acc.map_or(h, |a: f32| a.max(h))))
    }
}

/// A token from one run: either a whitespace or non-whitespace span, or a
/// hard break from an embedded newline.
#[derive(Debug)]
enum Token {
    Text { text: String, font: Font },
    HardBreak,
}

fn tokenize(paragraph: &Paragraph, resolver: &dyn FontResolver) -> Vec<Token> {
    let mut tokens = Vec::new();

    for run in &paragraph.runs {
        let font = resolver.resolve(run);
        let normalized = run.text.replace("\r\n", "\n").replace('\r', "\n");

        let mut first_segment = true;
        for segment in normalized.split('\n') {
            if !first_segment {
                tokens.push(Token::HardBreak);
            }
            first_segment = false;

            // Alternate whitespace / non-whitespace spans; a token never
            // mixes the two.
            let mut start = 0;
            let mut current_is_ws: Option<bool> = None;
            for (i, c) in segment.char_indices() {
                let is_ws = c.is_whitespace();
                match current_is_ws {
                    None => current_is_ws = Some(is_ws),
                    Some(prev) if prev != is_ws => {
                        tokens.push(Token::Text {
                            text: segment[start..i].to_string(),
                            font: font.clone(),
                        });
                        start = i;
                        current_is_ws = Some(is_ws);
                    }
                    _ => {}
                }
            }
            if start < segment.len() {
                tokens.push(Token::Text {
                    text: segment[start..].to_string(),
                    font: font.clone(),
                });
            }
        }
    }

    tokens
}

struct LineBuilder {
    lines: Vec<WrappedLine>,
    current: WrappedLine,
    current_width: f32,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: WrappedLine::default(),
            current_width: 0.0,
        }
    }

    fn append(&mut self, text: &str, width: f32, font: &Font) {
        match self.current.spans.last_mut() {
            // Merge into the previous span when the font matches.
            Some(last) if last.font == *font => last.text.push_str(text),
            _ => self.current.spans.push(LineSpan {
                text: text.to_string(),
                font: font.clone(),
            }),
        }
        self.current_width += width;
    }

    fn flush(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.current_width = 0.0;
    }

    fn is_empty(&self) -> bool {
        self.current.spans.is_empty()
    }
}

/// Largest count of leading graphemes of `text` whose measured width fits
/// in `available`, with that prefix's byte length and width.
fn fitting_prefix(text: &str, font: &Font, available: f32) -> (usize, usize, f32) {
    let mut count = 0;
    let mut byte_len = 0;
    let mut width = 0.0;

    for (i, g) in text.grapheme_indices(true) {
        let end = i + g.len();
        let w = font.measure(&text[..end]);
        if w > available {
            break;
        }
        count += 1;
        byte_len = end;
        width = w;
    }

    (count, byte_len, width)
}

/// Wrap a paragraph's styled runs into lines no wider than `max_width`.
pub fn wrap_paragraph(
    paragraph: &Paragraph,
    max_width: f32,
    resolver: &dyn FontResolver,
) -> Vec<WrappedLine> {
    let tokens = tokenize(paragraph, resolver);
    let mut builder = LineBuilder::new();

    for token in tokens {
        match token {
            Token::HardBreak => {
                // Always flush, even when empty: blank source lines are
                // preserved as blank output lines.
                builder.flush();
            }
            Token::Text { text, font } => {
                let mut rest = text.as_str();
                while !rest.is_empty() {
                    let remaining = max_width - builder.current_width;
                    let full_width = font.measure(rest);
                    if full_width <= remaining {
                        builder.append(rest, full_width, &font);
                        break;
                    }

                    if !builder.is_empty() {
                        // Token does not fit after existing content; retry
                        // on a fresh line.
                        builder.flush();
                        continue;
                    }

                    // Alone on an empty line and still too wide: forced
                    // grapheme-level split, always taking at least one so
                    // the wrap makes progress.
                    let (count, byte_len, width) = fitting_prefix(rest, &font, max_width);
                    let (prefix, tail) = if count == 0 {
                        let first = rest
                            .grapheme_indices(true)
                            .nth(1)
                            .map(|(i, _)| i)
                            .unwrap_or(rest.len());
                        (&rest[..first], &rest[first..])
                    } else {
                        (&rest[..byte_len], &rest[byte_len..])
                    };
                    let prefix_width = if count == 0 { font.measure(prefix) } else { width };
                    builder.append(prefix, prefix_width, &font);
                    rest = tail;
                    if !rest.is_empty() {
                        builder.flush();
                    }
                }
            }
        }
    }

    if !builder.is_empty() || builder.lines.is_empty() {
        builder.flush();
    }
    builder.lines
}
