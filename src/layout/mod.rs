//! Everything needed to place lines of glyphs on pages.
//!
//! The layout is pure computation: glyph metadata is resolved before a pass
//! starts, and the engine only produces draw commands.

pub mod constants;
pub mod decorator;
pub mod engine;
pub mod geometry;
pub mod measure;
pub mod pages;
pub mod validation;

#[cfg(test)]
pub(crate) mod tests;

use serde::{Deserialize, Serialize};

use crate::layout::constants::{
    DEFAULT_FALLBACK_ADVANCE, DEFAULT_GLYPH_GAP, DEFAULT_LINE_GAP, DEFAULT_MARGIN,
    DEFAULT_SPACE_ADVANCE,
};
use crate::units::Mm;

/// What to do with a character that has no glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingGlyphPolicy {
    /// Refuse to render the document.
    Reject,

    /// Leave a blank of the fallback width.
    Skip,

    /// Draw an empty box of the fallback width.
    Placeholder,
}

/// The measurements that drive the layout of the lines.
///
/// All lengths are in millimeters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Distance between the left edge of the page and the start of the lines.
    pub margin_left: Mm,

    /// Distance between the top edge of the page and the top of the first line.
    pub margin_top: Mm,

    /// Distance kept free on the right of the lines.
    pub margin_right: Mm,

    /// No glyph is drawn below this distance from the bottom edge.
    pub margin_bottom: Mm,

    /// Vertical distance between the tops of two consecutive lines.
    pub line_spacing: Mm,

    /// Extra vertical distance added to the line spacing.
    pub line_gap: Mm,

    /// Height every glyph is scaled to.
    pub glyph_height: Mm,

    /// Horizontal distance left after every glyph.
    pub glyph_gap: Mm,

    /// How far a space moves the cursor.
    pub space_advance: Mm,

    /// How far a character without a usable glyph moves the cursor.
    pub fallback_advance: Mm,

    /// Where to rule a separator under each line, measured down from the top
    /// of the line. No separator when `None`.
    pub separator_offset: Option<Mm>,

    /// What to do with characters that have no glyph.
    pub missing_glyphs: MissingGlyphPolicy,
}

impl LayoutConfig {
    /// Creates the default configuration for a glyph height.
    pub fn with_glyph_height(glyph_height: Mm) -> LayoutConfig {
        LayoutConfig {
            margin_left: DEFAULT_MARGIN,
            margin_top: DEFAULT_MARGIN,
            margin_right: DEFAULT_MARGIN,
            margin_bottom: DEFAULT_MARGIN,
            line_spacing: glyph_height,
            line_gap: DEFAULT_LINE_GAP,
            glyph_height,
            glyph_gap: DEFAULT_GLYPH_GAP,
            space_advance: DEFAULT_SPACE_ADVANCE,
            fallback_advance: DEFAULT_FALLBACK_ADVANCE,
            separator_offset: Some(glyph_height + DEFAULT_LINE_GAP / 2.0),
            missing_glyphs: MissingGlyphPolicy::Reject,
        }
    }

    /// The vertical distance the cursor moves after each line.
    pub fn line_pitch(&self) -> Mm {
        self.line_spacing + self.line_gap
    }
}

/// What gets drawn for a glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The image stored under this key by the glyph provider.
    Image(char),

    /// This character, drawn with the native font.
    Text(char),
}

/// How a single character of a line is handled by the layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Resolution {
    /// A space: nothing is drawn, the cursor moves by the space advance.
    Space,

    /// A drawable glyph of the given width, at the configured glyph height.
    Glyph {
        /// What to draw.
        mark: Mark,

        /// The width of the drawn glyph.
        width: Mm,
    },

    /// A glyph exists but cannot be decoded; the fallback advance is used.
    Undecodable,

    /// No glyph for this character.
    Absent,
}

/// Something that knows how to draw characters.
pub trait GlyphSource {
    /// Resolves a character for a layout configuration.
    fn resolve(&self, c: char, config: &LayoutConfig) -> Resolution;
}
