//! This module contains everything that helps us dealing with native fonts.
//!
//! Native glyphs are drawn with the PDF base-14 Helvetica, which every reader
//! ships, so only its advance widths need to be known here.

use crate::layout::{GlyphSource, LayoutConfig, Mark, Resolution};
use crate::units::{Mm, Pt};

/// Advance widths of Helvetica for the printable ASCII range, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' to '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' to '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' to 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
    278, 278, 278, 469, 556, 333, // '[' to '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' to 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' to 'z'
    334, 260, 334, 584, // '{' to '~'
];

/// Width used to measure characters the font does not cover.
const FALLBACK_WIDTH: u16 = 556;

/// Depth of the Helvetica descenders below the baseline, in 1/1000 em.
const HELVETICA_DESCENT: u16 = 207;

/// The metrics of a built-in font.
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// The advance widths of the printable ASCII characters.
    widths: &'static [u16; 95],

    /// The depth of the descenders, in 1/1000 em.
    descent: u16,
}

impl Font {
    /// Returns the Helvetica metrics.
    pub fn helvetica() -> Font {
        Font {
            widths: &HELVETICA_WIDTHS,
            descent: HELVETICA_DESCENT,
        }
    }

    fn units(&self, c: char) -> Option<u16> {
        let index = (c as usize).checked_sub(0x20)?;
        self.widths.get(index).copied()
    }

    /// Returns true if the font can draw the char.
    pub fn covers(&self, c: char) -> bool {
        self.units(c).is_some()
    }

    /// Computes the width of a char of the font at a specified size.
    pub fn char_width(&self, c: char, size: Pt) -> Option<Mm> {
        self.units(c)
            .map(|units| Pt(f64::from(units) * size.0 / 1000.0).into())
    }

    /// Returns how far the descenders go below the baseline at a size.
    pub fn descent(&self, size: Pt) -> Mm {
        Pt(f64::from(self.descent) * size.0 / 1000.0).into()
    }

    /// Computes the text width of the font at a specified size.
    ///
    /// Characters the font does not cover are counted with an average width.
    pub fn text_width(&self, text: &str, size: Pt) -> Mm {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.units(c).unwrap_or(FALLBACK_WIDTH)))
            .sum();

        Pt(f64::from(units) * size.0 / 1000.0).into()
    }
}

/// The glyph source of the native font mode.
///
/// The glyph height is used as the font size.
#[derive(Debug, Clone, Copy)]
pub struct FontGlyphs {
    /// The font drawing the glyphs.
    pub font: Font,

    /// The advance of every glyph, when it should not follow the font metrics.
    pub advance: Option<Mm>,
}

impl FontGlyphs {
    /// Creates a glyph source that follows the Helvetica metrics.
    pub fn helvetica() -> FontGlyphs {
        FontGlyphs {
            font: Font::helvetica(),
            advance: None,
        }
    }

    /// Creates a glyph source where every glyph has the same advance.
    pub fn monospaced(advance: Mm) -> FontGlyphs {
        FontGlyphs {
            font: Font::helvetica(),
            advance: Some(advance),
        }
    }
}

impl GlyphSource for FontGlyphs {
    fn resolve(&self, c: char, config: &LayoutConfig) -> Resolution {
        if c == ' ' {
            return Resolution::Space;
        }

        match self.font.char_width(c, config.glyph_height.into()) {
            Some(width) => Resolution::Glyph {
                mark: Mark::Text(c),
                width: self.advance.unwrap_or(width),
            },
            None => Resolution::Absent,
        }
    }
}
