//! Measurement of the physical width of a line.

use crate::layout::{GlyphSource, LayoutConfig, Resolution};
use crate::units::Mm;

/// Computes how far a character moves the cursor.
pub fn advance(resolution: Resolution, config: &LayoutConfig) -> Mm {
    match resolution {
        Resolution::Space => config.space_advance,
        Resolution::Glyph { width, .. } => width + config.glyph_gap,
        Resolution::Undecodable | Resolution::Absent => config.fallback_advance,
    }
}

/// Measures lines with a glyph source.
pub struct LineMeasurer<'a> {
    /// The layout configuration.
    config: &'a LayoutConfig,

    /// The source of the glyphs.
    source: &'a dyn GlyphSource,
}

impl<'a> LineMeasurer<'a> {
    /// Creates a new measurer.
    pub fn new(config: &'a LayoutConfig, source: &'a dyn GlyphSource) -> LineMeasurer<'a> {
        LineMeasurer { config, source }
    }

    /// Returns the distance the cursor travels while laying the line out.
    ///
    /// Characters without a usable glyph count for the fallback advance, so a
    /// line missing glyphs comes out too wide rather than compacted.
    pub fn measure(&self, line: &str) -> Mm {
        line.chars().fold(Mm(0.0), |width, c| {
            width + advance(self.source.resolve(c, self.config), self.config)
        })
    }
}
