//! The drawing primitives a page is made of.

use crate::layout::engine::PlacementCommand;
use crate::units::{Mm, Pt};

/// A color with components between 0 and 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb {
    /// The red component.
    pub r: f64,

    /// The green component.
    pub g: f64,

    /// The blue component.
    pub b: f64,
}

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Red.
    pub const RED: Rgb = Rgb {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
}

/// How an outline is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    /// The color of the outline.
    pub color: Rgb,

    /// The thickness of the outline.
    pub thickness: Pt,
}

impl Stroke {
    /// Creates a new stroke.
    pub fn new(color: Rgb, thickness: Pt) -> Stroke {
        Stroke { color, thickness }
    }
}

/// Something to draw on a page. Coordinates start at the bottom left corner.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A glyph, or a placeholder box when it has no mark.
    Glyph(PlacementCommand),

    /// A straight line.
    Line {
        /// The start point.
        from: (Mm, Mm),

        /// The end point.
        to: (Mm, Mm),

        /// How the line is drawn.
        stroke: Stroke,
    },

    /// The outline of a rectangle.
    Rect {
        /// The left edge.
        x: Mm,

        /// The bottom edge.
        y: Mm,

        /// The width.
        width: Mm,

        /// The height.
        height: Mm,

        /// How the outline is drawn.
        stroke: Stroke,
    },

    /// A string written with the built-in font.
    Text {
        /// The text.
        text: String,

        /// The start of the baseline.
        x: Mm,

        /// The height of the baseline.
        y: Mm,

        /// The font size.
        size: Pt,
    },
}
