//! Various constants used for laying out and decorating pages.

use crate::units::{Mm, Pt};

/// The default distance between the page edges and the text.
pub const DEFAULT_MARGIN: Mm = Mm(20.0);

/// The default gap between two lines, on top of the letter height.
pub const DEFAULT_LINE_GAP: Mm = Mm(20.0);

/// The default gap left after each glyph.
pub const DEFAULT_GLYPH_GAP: Mm = Mm(5.0);

/// The default width of a whitespace.
pub const DEFAULT_SPACE_ADVANCE: Mm = Mm(15.0);

/// The width charged for a character whose glyph is missing or broken.
///
/// It is large on purpose so that such lines get reported as too wide.
pub const DEFAULT_FALLBACK_ADVANCE: Mm = Mm(50.0);

/// The default letter height.
pub const DEFAULT_LETTER_HEIGHT: Mm = Mm(100.0);

/// The default inset of the border from the page edges.
pub const DEFAULT_BORDER_INSET: Mm = Mm(5.0);

/// The default distance between the bottom edge and the footer baseline.
pub const DEFAULT_FOOTER_OFFSET: Mm = Mm(8.0);

/// The size of the footer text.
pub const FOOTER_FONT_SIZE: Pt = Pt(10.0);

/// The thickness of the page border.
pub const BORDER_THICKNESS: Pt = Pt(2.0);

/// The thickness of the line separators.
pub const SEPARATOR_THICKNESS: Pt = Pt(0.5);

/// The thickness of the placeholder boxes.
pub const PLACEHOLDER_THICKNESS: Pt = Pt(0.5);

/// Tolerance used when comparing lengths computed with floats.
pub const EPSILON: Mm = Mm(1e-6);
