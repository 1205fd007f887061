//! Pages are the output of the layout: a list of draw commands each, ready
//! to be handed to a pdf backend.

pub mod items;

use std::mem;

pub use crate::layout::pages::items::{DrawCommand, Rgb, Stroke};

use crate::layout::decorator::PageDecorator;
use crate::layout::engine::{LayoutEvent, LayoutSink};
use crate::layout::geometry::PageGeometry;

/// Holds the draw commands of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The number of the page within the document, starting at 1.
    pub number: usize,

    /// What to draw, in order.
    pub commands: Vec<DrawCommand>,
}

/// A laid out document.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// The size of every page.
    pub geometry: PageGeometry,

    /// The pages, in order.
    pub pages: Vec<Page>,
}

impl Layout {
    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// A layout sink that turns events into decorated pages.
///
/// It needs the final page count upfront so that every footer is right.
pub struct Composer<'a> {
    /// Decorates the completed pages.
    decorator: &'a PageDecorator,

    /// The final number of pages.
    total_pages: usize,

    /// The commands of the page being filled.
    current: Vec<DrawCommand>,

    /// The completed pages.
    pages: Vec<Page>,
}

impl<'a> Composer<'a> {
    /// Creates a composer for a document of `total_pages` pages.
    pub fn new(decorator: &'a PageDecorator, total_pages: usize) -> Composer<'a> {
        Composer {
            decorator,
            total_pages,
            current: vec![],
            pages: Vec::with_capacity(total_pages),
        }
    }

    /// Returns the completed layout.
    pub fn finish(self, geometry: PageGeometry) -> Layout {
        Layout {
            geometry,
            pages: self.pages,
        }
    }
}

impl<'a> LayoutSink for Composer<'a> {
    fn event(&mut self, event: LayoutEvent) {
        match event {
            LayoutEvent::Placement(placement) => {
                self.current.push(DrawCommand::Glyph(placement));
            }

            LayoutEvent::Separator(rule) => {
                self.current.push(DrawCommand::Line {
                    from: (rule.from, rule.y),
                    to: (rule.to, rule.y),
                    stroke: self.decorator.separator(),
                });
            }

            LayoutEvent::PageBreak(page_break) => {
                let number = page_break.completed_page_index;
                self.current
                    .extend(self.decorator.on_page_complete(number, self.total_pages));

                self.pages.push(Page {
                    number,
                    commands: mem::take(&mut self.current),
                });
            }
        }
    }
}
