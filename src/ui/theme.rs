//! Design tokens for `bp` output.
//!
//! Five semantic colors, and every glyph as a unicode/ascii pair so that
//! nothing outside this module decides what a dumb terminal sees.

use crossterm::style::Color;

pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

/// A glyph with its ASCII stand-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub unicode: &'static str,
    pub ascii: &'static str,
}

impl Glyph {
    const fn new(unicode: &'static str, ascii: &'static str) -> Self {
        Self { unicode, ascii }
    }

    pub fn pick(&self, supports_unicode: bool) -> &'static str {
        if supports_unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

pub mod icons {
    use super::Glyph;

    pub const SUCCESS: Glyph = Glyph::new("✓", "[OK]");
    pub const ERROR: Glyph = Glyph::new("✗", "[FAIL]");
    pub const WARNING: Glyph = Glyph::new("⚠", "[WARN]");
    pub const PROGRESS: Glyph = Glyph::new("●", "[..]");
    pub const ARROW: Glyph = Glyph::new("↳", "[>]");
    pub const POINTER: Glyph = Glyph::new("↑", "^");

    // command headers
    pub const WATCH: Glyph = Glyph::new("⟳", "[~]");
    pub const NEW: Glyph = Glyph::new("✨", "[NEW]");
}

pub mod borders {
    use super::Glyph;

    pub const TOP_LEFT: Glyph = Glyph::new("╭", "+");
    pub const TOP_RIGHT: Glyph = Glyph::new("╮", "+");
    pub const BOTTOM_LEFT: Glyph = Glyph::new("╰", "+");
    pub const BOTTOM_RIGHT: Glyph = Glyph::new("╯", "+");
    pub const HORIZONTAL: Glyph = Glyph::new("─", "-");
    pub const VERTICAL: Glyph = Glyph::new("│", "|");
}
