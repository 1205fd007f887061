//! The whole pipeline: validation, page count, layout and decoration.

use serde::{Deserialize, Serialize};

use crate::layout::decorator::{DecorationConfig, PageDecorator};
use crate::layout::engine::PageLayoutEngine;
use crate::layout::geometry::PageGeometry;
use crate::layout::pages::{Composer, Layout};
use crate::layout::validation::{Report, Validator};
use crate::layout::{GlyphSource, LayoutConfig, MissingGlyphPolicy};
use crate::{Error, Result};

/// What to do with lines wider than the page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Refuse to render the document.
    Reject,

    /// Render anyway, the end of the line runs off the page.
    Allow,
}

/// Splits a text into the lines to render: every line is trimmed, and empty
/// lines are dropped.
pub fn prepare_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Lays documents out on decorated pages.
pub struct Renderer<'a> {
    /// The size of the pages.
    pub geometry: PageGeometry,

    /// The layout configuration.
    pub layout: LayoutConfig,

    /// The decorations of the pages.
    pub decoration: DecorationConfig,

    /// What to do with lines wider than the page.
    pub overflow: OverflowPolicy,

    /// The source of the glyphs.
    source: &'a dyn GlyphSource,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer that rejects lines wider than the page.
    pub fn new(
        geometry: PageGeometry,
        layout: LayoutConfig,
        decoration: DecorationConfig,
        source: &'a dyn GlyphSource,
    ) -> Renderer<'a> {
        Renderer {
            geometry,
            layout,
            decoration,
            overflow: OverflowPolicy::Reject,
            source,
        }
    }

    /// Changes what to do with lines wider than the page.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Renderer<'a> {
        self.overflow = overflow;
        self
    }

    /// Checks the lines without laying anything out.
    pub fn validate<S: AsRef<str>>(&self, lines: &[S]) -> Report {
        Validator::new(self.geometry, &self.layout, self.source).validate(lines)
    }

    /// Applies the policies to a report.
    ///
    /// The report is returned as an error if the policies forbid what it
    /// found. Problems the policies allow are logged as warnings.
    pub fn accept(&self, report: Report) -> Result<Report> {
        let missing = report.missing_characters();
        let overlong = report.over_long_lines();

        if (!missing.is_empty() && self.layout.missing_glyphs == MissingGlyphPolicy::Reject)
            || (!overlong.is_empty() && self.overflow == OverflowPolicy::Reject)
        {
            return Err(Error::Rejected(report));
        }

        if !missing.is_empty() {
            warn!(
                "no glyph for {:?}, using {:?} policy",
                missing, self.layout.missing_glyphs
            );
        }

        if !overlong.is_empty() {
            warn!("lines {:?} run off the page", overlong);
        }

        Ok(report)
    }

    /// Lays the lines out.
    ///
    /// The lines are validated first, and if the policies forbid what was
    /// found, nothing is laid out and the report is returned as an error.
    pub fn compose<S: AsRef<str>>(&self, lines: &[S]) -> Result<Layout> {
        let engine = PageLayoutEngine::new(self.geometry, &self.layout, self.source)?;
        self.accept(self.validate(lines))?;

        let total_pages = engine.page_count(lines);
        debug!(
            "{} lines, {} per page, {} pages",
            lines.len(),
            engine.lines_per_page(),
            total_pages
        );

        let decorator = PageDecorator::new(self.geometry, self.decoration.clone());
        let mut composer = Composer::new(&decorator, total_pages);
        let pages = engine.run(lines, &mut composer);
        debug_assert_eq!(pages, total_pages);

        Ok(composer.finish(self.geometry))
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::decorator::DecorationConfig;
    use crate::layout::geometry::{Orientation, PageGeometry, PaperSize};
    use crate::layout::tests::square_glyphs;
    use crate::layout::{LayoutConfig, MissingGlyphPolicy};
    use crate::render::{prepare_lines, OverflowPolicy, Renderer};
    use crate::units::Mm;
    use crate::Error;

    #[test]
    fn lines_are_trimmed_and_blank_ones_dropped() {
        let text = "  HELLO \n\n\tWORLD\r\n   \nEND";
        assert_eq!(prepare_lines(text), vec!["HELLO", "WORLD", "END"]);
    }

    #[test]
    fn empty_text() {
        assert!(prepare_lines("").is_empty());
        assert!(prepare_lines(" \n \n").is_empty());
    }

    #[test]
    fn policies_decide_what_is_accepted() {
        let catalog = square_glyphs("A");
        let mut layout = LayoutConfig::with_glyph_height(Mm(100.0));
        let geometry = PageGeometry::new(PaperSize::A4, Orientation::Portrait);
        let lines = ["AB", "AAA"];

        let renderer = Renderer::new(geometry, layout, DecorationConfig::bare(), &catalog);
        match renderer.accept(renderer.validate(&lines)) {
            Err(Error::Rejected(report)) => assert_eq!(report.over_long_lines(), vec![2]),
            other => panic!("expected a rejection, got {:?}", other.map(|_| ())),
        }

        layout.missing_glyphs = MissingGlyphPolicy::Skip;
        let renderer = Renderer::new(geometry, layout, DecorationConfig::bare(), &catalog)
            .with_overflow(OverflowPolicy::Allow);
        let report = renderer.accept(renderer.validate(&lines)).unwrap();

        assert!(!report.is_clean());
        assert_eq!(report.missing_glyphs().len(), 1);
    }
}
