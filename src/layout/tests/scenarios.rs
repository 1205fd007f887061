use std::collections::BTreeSet;

use test_case::test_case;

use crate::glyphs::GlyphCatalog;
use crate::layout::decorator::DecorationConfig;
use crate::layout::engine::PageLayoutEngine;
use crate::layout::geometry::{Orientation, PageGeometry, PaperSize};
use crate::layout::pages::{DrawCommand, Layout};
use crate::layout::tests::{page_breaks, placements, square_glyphs};
use crate::layout::{LayoutConfig, MissingGlyphPolicy};
use crate::render::{OverflowPolicy, Renderer};
use crate::units::{nearly_equal, Mm};
use crate::{Error, Result};

fn a4() -> PageGeometry {
    PageGeometry::new(PaperSize::A4, Orientation::Portrait)
}

/// Pitch of 20 mm, and 10 lines on an A4 page.
fn tight() -> LayoutConfig {
    let mut config = LayoutConfig::with_glyph_height(Mm(10.0));
    config.margin_top = Mm(50.0);
    config.margin_bottom = Mm(47.0);
    config.line_spacing = Mm(20.0);
    config.line_gap = Mm(0.0);
    config
}

fn footers(layout: &Layout) -> Vec<String> {
    layout
        .pages
        .iter()
        .flat_map(|page| page.commands.iter())
        .filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn glyph_ys(layout: &Layout) -> Vec<Vec<Mm>> {
    layout
        .pages
        .iter()
        .map(|page| {
            page.commands
                .iter()
                .filter_map(|command| match command {
                    DrawCommand::Glyph(placement) => Some(placement.y),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[test]
fn hello_fits_on_one_page() -> Result<()> {
    let catalog = square_glyphs("HELO");
    let config = LayoutConfig::with_glyph_height(Mm(50.0));
    let renderer = Renderer::new(a4(), config, DecorationConfig::new(PaperSize::A4, ""), &catalog)
        .with_overflow(OverflowPolicy::Allow);

    let layout = renderer.compose(&["HELLO"])?;
    assert_eq!(layout.page_count(), 1);

    let xs: Vec<Mm> = layout.pages[0]
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Glyph(placement) => Some(placement.x),
            _ => None,
        })
        .collect();

    assert_eq!(xs.len(), 5);
    assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(footers(&layout), vec!["Page 1/1 - A4"]);

    Ok(())
}

#[test]
fn forty_lines_on_four_pages() {
    let catalog = square_glyphs("A");
    let config = tight();
    let engine = PageLayoutEngine::new(a4(), &config, &catalog).unwrap();
    let lines = vec!["AAA"; 40];
    let mut events = vec![];

    assert_eq!(engine.lines_per_page(), 10);
    assert_eq!(engine.run(&lines, &mut events), 4);

    let indices: Vec<usize> = page_breaks(&events)
        .iter()
        .map(|page_break| page_break.completed_page_index)
        .collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
}

#[test]
fn missing_glyph_rejects_before_layout() {
    let catalog = square_glyphs("A");
    let renderer = Renderer::new(
        a4(),
        LayoutConfig::with_glyph_height(Mm(50.0)),
        DecorationConfig::bare(),
        &catalog,
    );

    let report = renderer.validate(&["AB"]);
    let expected: BTreeSet<char> = ['B'].iter().copied().collect();
    assert_eq!(report.missing_characters(), &expected);

    match renderer.compose(&["AB"]) {
        Err(Error::Rejected(report)) => assert_eq!(report.missing_characters(), &expected),
        other => panic!("expected a rejection, got {:?}", other.map(|l| l.page_count())),
    }
}

#[test]
fn missing_glyph_skipped_on_request() -> Result<()> {
    let catalog = square_glyphs("A");
    let mut config = LayoutConfig::with_glyph_height(Mm(50.0));
    config.missing_glyphs = MissingGlyphPolicy::Skip;
    let renderer = Renderer::new(a4(), config, DecorationConfig::bare(), &catalog);

    let layout = renderer.compose(&["AB"])?;
    assert_eq!(glyph_ys(&layout), vec![vec![Mm(227.0)]]);

    Ok(())
}

#[test]
fn long_line_of_wide_glyphs() {
    let catalog = square_glyphs("M");
    let renderer = Renderer::new(
        a4(),
        LayoutConfig::with_glyph_height(Mm(150.0)),
        DecorationConfig::bare(),
        &catalog,
    );
    let line = "M".repeat(200);

    assert_eq!(renderer.validate(&[&line]).over_long_lines(), vec![1]);
    assert!(matches!(
        renderer.compose(&[&line]),
        Err(Error::Rejected(_))
    ));
}

#[test_case(1, 1 ; "one line")]
#[test_case(10, 1 ; "full page")]
#[test_case(11, 2 ; "one line over")]
#[test_case(35, 4 ; "partial last page")]
fn every_footer_knows_the_total(lines: usize, pages: usize) {
    let catalog = square_glyphs("A");
    let decoration = DecorationConfig::new(PaperSize::A4, "X");
    let renderer = Renderer::new(a4(), tight(), decoration, &catalog);

    let layout = renderer.compose(&vec!["A"; lines]).unwrap();
    let footers = footers(&layout);

    assert_eq!(layout.page_count(), pages);
    assert_eq!(footers.len(), pages);

    for (index, footer) in footers.iter().enumerate() {
        assert_eq!(footer, &format!("Page {}/{} - A4 - X", index + 1, pages));
    }
}

#[test]
fn pages_are_numbered_in_order() -> Result<()> {
    let catalog = square_glyphs("A");
    let renderer = Renderer::new(a4(), tight(), DecorationConfig::bare(), &catalog);

    let layout = renderer.compose(&vec!["A"; 25])?;
    let numbers: Vec<usize> = layout.pages.iter().map(|page| page.number).collect();

    assert_eq!(numbers, vec![1, 2, 3]);

    Ok(())
}

#[test]
fn lines_move_down_by_the_pitch() -> Result<()> {
    let catalog = square_glyphs("A");
    let config = tight();
    let renderer = Renderer::new(a4(), config, DecorationConfig::bare(), &catalog);

    let layout = renderer.compose(&vec!["A"; 14])?;

    for ys in glyph_ys(&layout) {
        for pair in ys.windows(2) {
            assert!(nearly_equal((pair[0] - pair[1]).0, config.line_pitch().0));
        }
    }

    Ok(())
}

#[test]
fn glyphs_stay_inside_the_margins() -> Result<()> {
    let catalog = square_glyphs("AB");
    let config = tight();
    let renderer = Renderer::new(a4(), config, DecorationConfig::bare(), &catalog);

    let layout = renderer.compose(&vec!["AB BA"; 33])?;

    for page in &layout.pages {
        for command in &page.commands {
            if let DrawCommand::Glyph(placement) = command {
                assert!(placement.y >= config.margin_bottom);
                assert!(placement.y + placement.height <= Mm(297.0) - config.margin_top);
                assert!(placement.x + placement.width <= Mm(210.0) - config.margin_right);
            }
        }
    }

    Ok(())
}

#[test]
fn layout_is_idempotent() -> Result<()> {
    let catalog: GlyphCatalog = square_glyphs("HELOWRD");
    let renderer = Renderer::new(
        PageGeometry::new(PaperSize::A3, Orientation::Landscape),
        LayoutConfig::with_glyph_height(Mm(50.0)),
        DecorationConfig::new(PaperSize::A3, "NCC"),
        &catalog,
    )
    .with_overflow(OverflowPolicy::Allow);
    let lines = vec!["HELLO", "WORLD", "HELLO WORLD", "OLD", "RED", "LOW"];

    let first = renderer.compose(&lines)?;
    let second = renderer.compose(&lines)?;

    assert_eq!(first, second);
    assert_eq!(
        placements_count(&first),
        lines.iter().map(|line| line.replace(' ', "").len()).sum::<usize>()
    );

    Ok(())
}

fn placements_count(layout: &Layout) -> usize {
    layout
        .pages
        .iter()
        .flat_map(|page| page.commands.iter())
        .filter(|command| matches!(command, DrawCommand::Glyph(_)))
        .count()
}

#[test]
fn dry_run_matches_the_real_pass() {
    let catalog = square_glyphs("A");
    let config = tight();
    let engine = PageLayoutEngine::new(a4(), &config, &catalog).unwrap();

    for count in 0..45 {
        let lines = vec!["A"; count];
        let mut events = vec![];
        let pages = engine.run(&lines, &mut events);

        assert_eq!(engine.page_count(&lines), pages);
        assert_eq!(page_breaks(&events).len(), pages);
        assert_eq!(placements(&events).len(), count);
    }
}
