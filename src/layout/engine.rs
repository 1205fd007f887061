//! The pagination engine: walks the lines, places the glyphs, and decides
//! where pages break.
//!
//! Every input line becomes exactly one physical line. A line is only started
//! on a page if its whole height fits above the bottom margin, otherwise the
//! page is closed first, so no glyph is ever clipped. In font mode the pdf
//! backend raises the baseline by the font descent to keep descenders inside
//! the placement.

use std::iter::Peekable;

use crate::layout::constants::EPSILON;
use crate::layout::geometry::PageGeometry;
use crate::layout::measure::advance;
use crate::layout::{GlyphSource, LayoutConfig, Mark, MissingGlyphPolicy, Resolution};
use crate::units::Mm;
use crate::{Error, Result};

/// The placement of one glyph on a page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementCommand {
    /// What to draw, `None` for a placeholder box.
    pub mark: Option<Mark>,

    /// The left edge of the glyph.
    pub x: Mm,

    /// The bottom edge of the glyph.
    pub y: Mm,

    /// The width of the glyph.
    pub width: Mm,

    /// The height of the glyph.
    pub height: Mm,
}

/// A horizontal rule under a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rule {
    /// Where the rule starts.
    pub from: Mm,

    /// Where the rule ends.
    pub to: Mm,

    /// The height of the rule on the page.
    pub y: Mm,
}

/// Sent when a page has received its last line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageBreakEvent {
    /// The number of the page that was completed, starting at 1.
    pub completed_page_index: usize,

    /// The number of lines laid out so far in the document.
    pub total_lines_so_far: usize,
}

/// What the engine produces, in document order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutEvent {
    /// A glyph was placed.
    Placement(PlacementCommand),

    /// A line was completed and ruled.
    Separator(Rule),

    /// A page was completed.
    PageBreak(PageBreakEvent),
}

/// Something that consumes the events of a layout pass.
pub trait LayoutSink {
    /// Consumes an event.
    fn event(&mut self, event: LayoutEvent);
}

impl LayoutSink for Vec<LayoutEvent> {
    fn event(&mut self, event: LayoutEvent) {
        self.push(event);
    }
}

/// A sink that drops everything, for dry runs.
struct Discard;

impl LayoutSink for Discard {
    fn event(&mut self, _: LayoutEvent) {}
}

/// The mutable position of a layout pass.
#[derive(Copy, Clone, Debug)]
struct LayoutCursor {
    /// Where the next glyph goes.
    x: Mm,

    /// The top of the current line.
    y: Mm,

    /// The number of the current page, starting at 1.
    page_index: usize,

    /// How many lines the current page holds.
    lines_on_page: usize,
}

/// The states of a layout pass.
enum State<'l> {
    AwaitingLine,
    LayingOutGlyphs(&'l str),
    LineComplete,
    PageComplete,
    AllLinesComplete,
}

/// Lays lines of glyphs out on pages.
pub struct PageLayoutEngine<'a> {
    /// The size of the pages.
    geometry: PageGeometry,

    /// The layout configuration.
    config: &'a LayoutConfig,

    /// The source of the glyphs.
    source: &'a dyn GlyphSource,
}

impl<'a> PageLayoutEngine<'a> {
    /// Creates an engine, refusing geometries on which no line can be laid out.
    pub fn new(
        geometry: PageGeometry,
        config: &'a LayoutConfig,
        source: &'a dyn GlyphSource,
    ) -> Result<PageLayoutEngine<'a>> {
        let usable_width = geometry.width - config.margin_left - config.margin_right;

        if usable_width <= Mm(0.0) {
            return Err(Error::DegenerateGeometry(format!(
                "the margins leave {:?} of usable width",
                usable_width
            )));
        }

        if config.glyph_height <= Mm(0.0) {
            return Err(Error::DegenerateGeometry(format!(
                "the glyph height is {:?}",
                config.glyph_height
            )));
        }

        if config.line_pitch() <= Mm(0.0) {
            return Err(Error::DegenerateGeometry(format!(
                "lines would move by {:?}",
                config.line_pitch()
            )));
        }

        let engine = PageLayoutEngine {
            geometry,
            config,
            source,
        };

        if !engine.fits(engine.page_top()) {
            return Err(Error::DegenerateGeometry(format!(
                "a {:?} high line does not fit between the margins of a {:?} high page",
                config.glyph_height, geometry.height
            )));
        }

        Ok(engine)
    }

    /// The top of the first line of every page.
    pub fn page_top(&self) -> Mm {
        self.geometry.height - self.config.margin_top
    }

    /// The width available to a line.
    pub fn usable_width(&self) -> Mm {
        self.geometry.width - self.config.margin_left - self.config.margin_right
    }

    /// Returns true if a line whose top is at `y` stays above the bottom margin.
    fn fits(&self, y: Mm) -> bool {
        y - self.config.glyph_height >= self.config.margin_bottom - EPSILON
    }

    /// Returns how many lines a page holds.
    pub fn lines_per_page(&self) -> usize {
        let free = self.page_top() - self.config.glyph_height - self.config.margin_bottom;
        ((free + EPSILON) / self.config.line_pitch()).0.floor() as usize + 1
    }

    /// Counts the pages the lines need, without drawing anything.
    ///
    /// It runs the same pass as [`run`](PageLayoutEngine::run), so the count
    /// always matches the pages the real pass produces.
    pub fn page_count<S: AsRef<str>>(&self, lines: &[S]) -> usize {
        self.run(lines, &mut Discard)
    }

    /// Lays the lines out, sending the events to the sink, and returns the
    /// number of pages.
    ///
    /// No line means no page.
    pub fn run<S, K>(&self, lines: &[S], sink: &mut K) -> usize
    where
        S: AsRef<str>,
        K: LayoutSink + ?Sized,
    {
        let mut remaining = lines.iter().map(as_str).peekable();
        let mut cursor = LayoutCursor {
            x: self.config.margin_left,
            y: self.page_top(),
            page_index: 1,
            lines_on_page: 0,
        };
        let mut total_lines = 0;
        let mut pages = 0;
        let mut state = State::AwaitingLine;

        loop {
            state = match state {
                State::AwaitingLine => match remaining.next() {
                    Some(line) => {
                        cursor.x = self.config.margin_left;
                        State::LayingOutGlyphs(line)
                    }
                    None => State::AllLinesComplete,
                },

                State::LayingOutGlyphs(line) => {
                    self.lay_out_line(line, &mut cursor, sink);
                    total_lines += 1;
                    cursor.lines_on_page += 1;
                    State::LineComplete
                }

                State::LineComplete => {
                    if let Some(offset) = self.config.separator_offset {
                        sink.event(LayoutEvent::Separator(Rule {
                            from: self.config.margin_left,
                            to: self.geometry.width - self.config.margin_right,
                            y: cursor.y - offset,
                        }));
                    }

                    cursor.y -= self.config.line_pitch();

                    if self.fits(cursor.y) {
                        State::AwaitingLine
                    } else {
                        State::PageComplete
                    }
                }

                State::PageComplete => {
                    pages = self.close_page(&mut cursor, total_lines, sink);

                    if has_more(&mut remaining) {
                        cursor.x = self.config.margin_left;
                        cursor.y = self.page_top();
                        cursor.page_index += 1;
                        State::AwaitingLine
                    } else {
                        State::AllLinesComplete
                    }
                }

                State::AllLinesComplete => {
                    if cursor.lines_on_page > 0 {
                        pages = self.close_page(&mut cursor, total_lines, sink);
                    }
                    break;
                }
            };
        }

        pages
    }

    fn close_page<K: LayoutSink + ?Sized>(
        &self,
        cursor: &mut LayoutCursor,
        total_lines: usize,
        sink: &mut K,
    ) -> usize {
        sink.event(LayoutEvent::PageBreak(PageBreakEvent {
            completed_page_index: cursor.page_index,
            total_lines_so_far: total_lines,
        }));
        cursor.lines_on_page = 0;
        cursor.page_index
    }

    fn lay_out_line<K: LayoutSink + ?Sized>(
        &self,
        line: &str,
        cursor: &mut LayoutCursor,
        sink: &mut K,
    ) {
        let bottom = cursor.y - self.config.glyph_height;

        for c in line.chars() {
            let resolution = self.source.resolve(c, self.config);

            let placement = match resolution {
                Resolution::Glyph { mark, width } => Some(PlacementCommand {
                    mark: Some(mark),
                    x: cursor.x,
                    y: bottom,
                    width,
                    height: self.config.glyph_height,
                }),
                Resolution::Absent
                    if self.config.missing_glyphs == MissingGlyphPolicy::Placeholder =>
                {
                    Some(PlacementCommand {
                        mark: None,
                        x: cursor.x,
                        y: bottom,
                        width: (self.config.fallback_advance - self.config.glyph_gap)
                            .max(Mm(0.0)),
                        height: self.config.glyph_height,
                    })
                }
                _ => None,
            };

            if let Some(placement) = placement {
                sink.event(LayoutEvent::Placement(placement));
            }

            cursor.x += advance(resolution, self.config);
        }
    }
}

fn as_str<S: AsRef<str>>(line: &S) -> &str {
    line.as_ref()
}

fn has_more<I: Iterator>(remaining: &mut Peekable<I>) -> bool {
    remaining.peek().is_some()
}
