//! Text measurement capability.
//!
//! The placement engine needs a bounding box per label but must not touch a
//! rendering surface itself. Callers with a live surface can implement
//! [`TextMetrics`] against it; headless callers and tests use
//! [`HeuristicMetrics`], which estimates from display columns.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f64) -> TextSize;
}

/// Offline font-metrics estimate.
///
/// Width is the number of display columns times an average glyph aspect ratio;
/// CJK glyphs count as two columns. Height is one line at the given size,
/// floored at `min_height` so empty or whitespace labels still reserve space.
#[derive(Debug, Clone)]
pub struct HeuristicMetrics {
    /// Average advance width of a glyph column relative to the font size.
    pub glyph_aspect: f64,
    /// Line height relative to the font size.
    pub line_height: f64,
    pub min_height: f64,
}

impl Default for HeuristicMetrics {
    fn default() -> Self {
        Self {
            glyph_aspect: 0.55,
            line_height: 1.15,
            min_height: 15.0,
        }
    }
}

impl TextMetrics for HeuristicMetrics {
    fn measure(&self, text: &str, font_size: f64) -> TextSize {
        let columns = text.width() as f64;
        TextSize {
            width: columns * font_size * self.glyph_aspect,
            height: (font_size * self.line_height).max(self.min_height),
        }
    }
}
