//! Style-to-font resolution
//!
//! The layout engine never touches system fonts. A [`FontResolver`] maps a
//! run's style flags to a [`Font`] whose glyph widths it can measure, and
//! the built-in resolver ships fixed advance tables so layout is fully
//! deterministic.

use doc_model::StyledRun;
use serde::{Deserialize, Serialize};

/// Nominal body size in points unless a consumer substitutes its own
pub const NOMINAL_BODY_SIZE: f32 = 12.0;

/// A font variant the exporters can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontKey {
    Body,
    BodyBold,
    BodyItalic,
    BodyBoldItalic,
    Mono,
    MonoBold,
    MonoItalic,
    MonoBoldItalic,
}

impl FontKey {
    /// Pick the variant for a run's style flags.
    ///
    /// Underline and strikethrough are decorations, not font variants.
    pub fn for_run(run: &StyledRun) -> Self {
        match (run.monospaced, run.bold, run.italic) {
            (false, false, false) => FontKey::Body,
            (false, true, false) => FontKey::BodyBold,
            (false, false, true) => FontKey::BodyItalic,
            (false, true, true) => FontKey::BodyBoldItalic,
            (true, false, false) => FontKey::Mono,
            (true, true, false) => FontKey::MonoBold,
            (true, false, true) => FontKey::MonoItalic,
            (true, true, true) => FontKey::MonoBoldItalic,
        }
    }

    pub fn is_mono(&self) -> bool {
        matches!(
            self,
            FontKey::Mono | FontKey::MonoBold | FontKey::MonoItalic | FontKey::MonoBoldItalic
        )
    }
}

/// A measurable font: a variant key, a size, and an advance table.
///
/// Widths come from `measure`, which takes whole substrings so a resolver
/// backed by a real shaper can honor kerning; callers must not sum
/// per-character widths themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub key: FontKey,
    /// Size in points
    pub size: f32,
    /// Glyph advances in font units (units-per-em 1000)
    advances: AdvanceTable,
}

/// Fixed advance tables, in thousandths of an em.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum AdvanceTable {
    /// Every glyph advances half an em
    Mono,
    /// Helvetica-like proportional widths
    Proportional,
}

impl AdvanceTable {
    fn advance_units(&self, c: char) -> u32 {
        match self {
            AdvanceTable::Mono => 500,
            AdvanceTable::Proportional => match c {
                ' ' => 278,
                'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' => 222,
                'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 333,
                'm' | 'w' => 833,
                'M' | 'W' => 944,
                c if c.is_ascii_uppercase() => 667,
                c if c.is_ascii_digit() => 556,
                '\t' => 556,
                _ => 556,
            },
        }
    }
}

impl Font {
    fn new(key: FontKey, size: f32) -> Self {
        let advances = if key.is_mono() {
            AdvanceTable::Mono
        } else {
            AdvanceTable::Proportional
        };
        Self { key, size, advances }
    }

    /// Measure a substring's width in points.
    pub fn measure(&self, text: &str) -> f32 {
        let units: u32 = text.chars().map(|c| self.advances.advance_units(c)).sum();
        units as f32 / 1000.0 * self.size
    }

    /// The font's line height basis (ascent plus descent)
    pub fn height(&self) -> f32 {
        self.size * 1.2
    }
}

/// Maps style flags to measurable fonts
pub trait FontResolver {
    /// The font a run renders in
    fn resolve(&self, run: &StyledRun) -> Font;

    /// The font whose height a span-less (blank) line occupies
    fn default_font(&self) -> Font;
}

/// The built-in deterministic resolver: eight fixed variants at one body
/// size, widths from the static advance tables.
#[derive(Debug, Clone)]
pub struct BuiltinFonts {
    body_size: f32,
}

impl BuiltinFonts {
    pub fn new() -> Self {
        Self {
            body_size: NOMINAL_BODY_SIZE,
        }
    }

    pub fn with_body_size(body_size: f32) -> Self {
        Self { body_size }
    }
}

impl Default for BuiltinFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver for BuiltinFonts {
    fn resolve(&self, run: &StyledRun) -> Font {
        Font::new(FontKey::for_run(run), self.body_size)
    }

    fn default_font(&self) -> Font {
        Font::new(FontKey::Body, self.body_size)
    }
}
