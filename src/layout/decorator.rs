//! Decorations added to every completed page: border and footer.

use serde::{Deserialize, Serialize};

use crate::fonts::Font;
use crate::layout::constants::{
    BORDER_THICKNESS, DEFAULT_BORDER_INSET, DEFAULT_FOOTER_OFFSET, DEFAULT_MARGIN,
    FOOTER_FONT_SIZE, SEPARATOR_THICKNESS,
};
use crate::layout::geometry::{PageGeometry, PaperSize};
use crate::layout::pages::{DrawCommand, Rgb, Stroke};
use crate::units::{Mm, Pt};

/// Horizontal alignment of the footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Centered on the page.
    Center,

    /// Against the right margin.
    Right,
}

/// A rectangle drawn around the page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    /// The distance between the page edges and the border.
    pub inset: Mm,

    /// How the border is drawn.
    pub stroke: Stroke,
}

/// The running text at the bottom of each page.
#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    /// The distance between the bottom edge and the footer baseline.
    pub offset: Mm,

    /// The distance kept between a right aligned footer and the right edge.
    pub margin: Mm,

    /// The font size.
    pub size: Pt,

    /// The horizontal alignment.
    pub align: Align,

    /// The paper size printed in the footer.
    pub paper: PaperSize,

    /// Free text printed after the paper size.
    pub label: String,
}

impl Footer {
    /// Creates a centered footer.
    pub fn new(paper: PaperSize, label: &str) -> Footer {
        Footer {
            offset: DEFAULT_FOOTER_OFFSET,
            margin: DEFAULT_MARGIN,
            size: FOOTER_FONT_SIZE,
            align: Align::Center,
            paper,
            label: label.to_owned(),
        }
    }

    /// Returns the footer text of a page.
    pub fn text(&self, page_index: usize, total_pages: usize) -> String {
        let mut text = format!("Page {}/{} - {}", page_index, total_pages, self.paper);

        if !self.label.is_empty() {
            text.push_str(" - ");
            text.push_str(&self.label);
        }

        text
    }
}

/// The decorations of the pages.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationConfig {
    /// The border, if any.
    pub border: Option<Border>,

    /// The footer, if any.
    pub footer: Option<Footer>,

    /// How line separators are drawn.
    pub separator: Stroke,
}

impl DecorationConfig {
    /// A red border and a centered footer.
    pub fn new(paper: PaperSize, label: &str) -> DecorationConfig {
        DecorationConfig {
            border: Some(Border {
                inset: DEFAULT_BORDER_INSET,
                stroke: Stroke::new(Rgb::RED, BORDER_THICKNESS),
            }),
            footer: Some(Footer::new(paper, label)),
            separator: Stroke::new(Rgb::BLACK, SEPARATOR_THICKNESS),
        }
    }

    /// No border and no footer.
    pub fn bare() -> DecorationConfig {
        DecorationConfig {
            border: None,
            footer: None,
            separator: Stroke::new(Rgb::BLACK, SEPARATOR_THICKNESS),
        }
    }
}

/// Produces the decorations of completed pages.
pub struct PageDecorator {
    /// The size of the pages.
    geometry: PageGeometry,

    /// What to draw.
    config: DecorationConfig,

    /// The font used to measure the footer.
    font: Font,
}

impl PageDecorator {
    /// Creates a new decorator.
    pub fn new(geometry: PageGeometry, config: DecorationConfig) -> PageDecorator {
        PageDecorator {
            geometry,
            config,
            font: Font::helvetica(),
        }
    }

    /// Returns the stroke of the line separators.
    pub fn separator(&self) -> Stroke {
        self.config.separator
    }

    /// Returns the draw commands decorating a completed page.
    ///
    /// The total must be the final page count of the document.
    pub fn on_page_complete(&self, page_index: usize, total_pages: usize) -> Vec<DrawCommand> {
        let mut commands = vec![];

        if let Some(border) = &self.config.border {
            commands.push(DrawCommand::Rect {
                x: border.inset,
                y: border.inset,
                width: self.geometry.width - border.inset * 2.0,
                height: self.geometry.height - border.inset * 2.0,
                stroke: border.stroke,
            });
        }

        if let Some(footer) = &self.config.footer {
            let text = footer.text(page_index, total_pages);
            let width = self.font.text_width(&text, footer.size);

            let x = match footer.align {
                Align::Center => (self.geometry.width - width) / 2.0,
                Align::Right => self.geometry.width - footer.margin - width,
            };

            commands.push(DrawCommand::Text {
                text,
                x,
                y: footer.offset,
                size: footer.size,
            });
        }

        commands
    }
}
