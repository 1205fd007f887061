//! Paper sizes, orientations and the page geometry they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::units::Mm;

/// The letter heights, in millimeters, offered by the command line.
pub const LETTER_HEIGHTS: [u32; 4] = [50, 75, 100, 150];

/// The ISO paper sizes a document can be printed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    /// 594 × 841 mm.
    A1,

    /// 420 × 594 mm.
    A2,

    /// 297 × 420 mm.
    A3,

    /// 210 × 297 mm.
    A4,
}

impl PaperSize {
    /// All the supported sizes, from the largest to the smallest.
    pub const ALL: [PaperSize; 4] = [PaperSize::A1, PaperSize::A2, PaperSize::A3, PaperSize::A4];

    /// Returns the portrait (width, height) of the paper.
    pub fn dimensions(self) -> (Mm, Mm) {
        match self {
            PaperSize::A1 => (Mm(594.0), Mm(841.0)),
            PaperSize::A2 => (Mm(420.0), Mm(594.0)),
            PaperSize::A3 => (Mm(297.0), Mm(420.0)),
            PaperSize::A4 => (Mm(210.0), Mm(297.0)),
        }
    }

    /// Returns the name of the paper size.
    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A1 => "A1",
            PaperSize::A2 => "A2",
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<PaperSize, String> {
        PaperSize::ALL
            .iter()
            .copied()
            .find(|paper| paper.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown paper size \"{}\", expected A1, A2, A3 or A4", s))
    }
}

/// How the paper is turned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// The long side is vertical.
    Portrait,

    /// The long side is horizontal.
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Orientation, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(format!(
                "unknown orientation \"{}\", expected portrait or landscape",
                s
            )),
        }
    }
}

/// The resolved size of every page of a document.
///
/// It never changes once a render pass has started.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageGeometry {
    /// The width of the page.
    pub width: Mm,

    /// The height of the page.
    pub height: Mm,
}

impl PageGeometry {
    /// Resolves a paper size and an orientation into a page size.
    pub fn new(paper: PaperSize, orientation: Orientation) -> PageGeometry {
        let (width, height) = paper.dimensions();

        match orientation {
            Orientation::Portrait => PageGeometry { width, height },
            Orientation::Landscape => PageGeometry {
                width: height,
                height: width,
            },
        }
    }

    /// Creates a page of arbitrary size.
    pub fn custom(width: Mm, height: Mm) -> PageGeometry {
        PageGeometry { width, height }
    }
}
