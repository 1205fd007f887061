//! Pre-flight checks, run before any page is laid out so that every problem
//! of a document is reported at once.

use std::collections::BTreeSet;
use std::fmt;

use colored::*;

use crate::layout::constants::EPSILON;
use crate::layout::geometry::PageGeometry;
use crate::layout::measure::LineMeasurer;
use crate::layout::{GlyphSource, LayoutConfig, Resolution};
use crate::units::Mm;

/// A line wider than the page allows.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlongLine {
    /// The number of the line, starting at 1.
    pub number: usize,

    /// The measured width of the line.
    pub width: Mm,

    /// The content of the line.
    pub content: String,
}

/// A character of a line that has no glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingGlyph {
    /// The number of the line, starting at 1.
    pub number: usize,

    /// The column of the character in the line, starting at 1.
    pub column: usize,

    /// The character.
    pub character: char,

    /// The content of the line.
    pub content: String,
}

/// The problems found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The characters without any glyph.
    missing: BTreeSet<char>,

    /// Every place where a character without glyph is used.
    occurrences: Vec<MissingGlyph>,

    /// The lines that are too wide.
    overlong: Vec<OverlongLine>,

    /// The width available to a line.
    usable_width: Mm,
}

impl Report {
    /// Returns the characters that have no glyph, in any case.
    pub fn missing_characters(&self) -> &BTreeSet<char> {
        &self.missing
    }

    /// Returns every use of a character that has no glyph, in reading order.
    pub fn missing_glyphs(&self) -> &[MissingGlyph] {
        &self.occurrences
    }

    /// Returns the numbers of the lines that are too wide, starting at 1.
    pub fn over_long_lines(&self) -> Vec<usize> {
        self.overlong.iter().map(|line| line.number).collect()
    }

    /// Returns the details of the lines that are too wide.
    pub fn overlong(&self) -> &[OverlongLine] {
        &self.overlong
    }

    /// Returns the width available to a line.
    pub fn usable_width(&self) -> Mm {
        self.usable_width
    }

    /// Returns true if nothing is wrong.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.overlong.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for glyph in &self.occurrences {
            let line_number = format!("{} ", glyph.number);
            let space = " ".repeat(line_number.len() - 1);
            let offset = " ".repeat(glyph.column - 1);

            writeln!(
                fmt,
                "{}{}",
                "error: ".bold().red(),
                "missing glyph image".bold()
            )?;
            writeln!(
                fmt,
                "{}{} line {}, column {}",
                space,
                "-->".bold().blue(),
                glyph.number,
                glyph.column
            )?;
            writeln!(fmt, "{} {}", space, "|".blue().bold())?;
            writeln!(
                fmt,
                "{} {}",
                &format!("{}|", line_number).blue().bold(),
                glyph.content
            )?;
            writeln!(
                fmt,
                "{} {} {}{} {}",
                space,
                "|".blue().bold(),
                offset,
                "^".bold().red(),
                format!("no glyph image for {:?}", glyph.character)
                    .bold()
                    .red()
            )?;
        }

        if !self.missing.is_empty() {
            let missing = self
                .missing
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(
                fmt,
                "  {} {}{}",
                "=".blue().bold(),
                "note: missing characters: ".bold(),
                missing
            )?;
        }

        for line in &self.overlong {
            let line_number = format!("{} ", line.number);
            let space = " ".repeat(line_number.len() - 1);
            let hats = "^".repeat(line.content.chars().count().max(1));

            writeln!(
                fmt,
                "{}{}",
                "warning: ".bold().yellow(),
                "line too long".bold()
            )?;
            writeln!(fmt, "{}{} line {}", space, "-->".bold().blue(), line.number)?;
            writeln!(fmt, "{} {}", space, "|".blue().bold())?;
            writeln!(
                fmt,
                "{} {}",
                &format!("{}|", line_number).blue().bold(),
                line.content
            )?;
            writeln!(
                fmt,
                "{} {} {} {}",
                space,
                "|".blue().bold(),
                hats.bold().yellow(),
                format!(
                    "{:.1} mm wide, {:.1} mm available",
                    line.width.0, self.usable_width.0
                )
                .bold()
                .yellow()
            )?;
        }

        Ok(())
    }
}

/// Checks documents against a glyph source and a page.
pub struct Validator<'a> {
    /// The width available to a line.
    usable_width: Mm,

    /// The layout configuration.
    config: &'a LayoutConfig,

    /// The source of the glyphs.
    source: &'a dyn GlyphSource,
}

impl<'a> Validator<'a> {
    /// Creates a new validator.
    pub fn new(
        geometry: PageGeometry,
        config: &'a LayoutConfig,
        source: &'a dyn GlyphSource,
    ) -> Validator<'a> {
        Validator {
            usable_width: geometry.width - config.margin_left - config.margin_right,
            config,
            source,
        }
    }

    /// Finds the missing glyphs and the lines that are too wide.
    ///
    /// A line exactly as wide as the usable width is fine.
    pub fn validate<S: AsRef<str>>(&self, lines: &[S]) -> Report {
        let measurer = LineMeasurer::new(self.config, self.source);
        let mut missing = BTreeSet::new();
        let mut occurrences = vec![];
        let mut overlong = vec![];

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();

            for (column, c) in line.chars().enumerate() {
                if self.source.resolve(c, self.config) == Resolution::Absent {
                    missing.insert(c);
                    occurrences.push(MissingGlyph {
                        number: index + 1,
                        column: column + 1,
                        character: c,
                        content: line.to_owned(),
                    });
                }
            }

            let width = measurer.measure(line);

            if width > self.usable_width + EPSILON {
                overlong.push(OverlongLine {
                    number: index + 1,
                    width,
                    content: line.to_owned(),
                });
            }
        }

        Report {
            missing,
            occurrences,
            overlong,
            usable_width: self.usable_width,
        }
    }
}
