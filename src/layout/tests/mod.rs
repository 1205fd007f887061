//! Helpers shared by the layout tests, and whole documents laid out end to end.

mod scenarios;

use image::DynamicImage;

use crate::glyphs::provider::GlyphSet;
use crate::glyphs::GlyphCatalog;
use crate::layout::engine::{LayoutEvent, PageBreakEvent, PlacementCommand};

/// A catalog with a square glyph for every character of `keys`.
pub fn square_glyphs(keys: &str) -> GlyphCatalog {
    let set = keys.chars().fold(GlyphSet::new(), |set, key| {
        set.with(key, DynamicImage::new_rgba8(10, 10))
    });

    GlyphCatalog::load(&set)
}

/// Keeps the placements of a list of events.
pub fn placements(events: &[LayoutEvent]) -> Vec<PlacementCommand> {
    events
        .iter()
        .filter_map(|event| match event {
            LayoutEvent::Placement(placement) => Some(*placement),
            _ => None,
        })
        .collect()
}

/// Keeps the page breaks of a list of events.
pub fn page_breaks(events: &[LayoutEvent]) -> Vec<PageBreakEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            LayoutEvent::PageBreak(page_break) => Some(*page_break),
            _ => None,
        })
        .collect()
}
