//! This module defines the configuration of a handletter project. The
//! configuration is parsed from a TOML file located at the root of the
//! project, and every field takes a default value provided by this module.

use std::{fmt, result};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::fonts::FontGlyphs;
use crate::layout::constants::{
    DEFAULT_BORDER_INSET, DEFAULT_FALLBACK_ADVANCE, DEFAULT_FOOTER_OFFSET, DEFAULT_GLYPH_GAP,
    DEFAULT_LETTER_HEIGHT, DEFAULT_LINE_GAP, DEFAULT_MARGIN, DEFAULT_SPACE_ADVANCE,
};
use crate::layout::decorator::{Align, Border, DecorationConfig, Footer};
use crate::layout::geometry::{Orientation, PageGeometry, PaperSize};
use crate::layout::{GlyphSource, LayoutConfig, MissingGlyphPolicy};
use crate::render::{OverflowPolicy, Renderer};
use crate::units::Mm;

/// Serializes a `Mm` structure.
// This is required to use in macro `serialize_with`.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_mm<S: Serializer>(mm: &Mm, serializer: S) -> result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(mm.0)
}

/// Deserializes a `Mm` structure.
pub fn deserialize_mm<'a, D: Deserializer<'a>>(deserializer: D) -> result::Result<Mm, D::Error> {
    deserializer.deserialize_f64(MmVisitor)
}

macro_rules! visit_from {
    ($visit: ident, $ty: ty) => {
        fn $visit<E>(self, value: $ty) -> result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Mm(f64::from(value)))
        }
    };
}

macro_rules! visit_as {
    ($visit: ident, $ty: ty) => {
        fn $visit<E>(self, value: $ty) -> result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Mm(value as f64))
        }
    };
}

/// Visitor for the `Mm` structure.
pub struct MmVisitor;

impl<'a> Visitor<'a> for MmVisitor {
    type Value = Mm;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a length in millimeters")
    }

    visit_from!(visit_u8, u8);
    visit_from!(visit_u16, u16);
    visit_from!(visit_u32, u32);
    visit_as!(visit_u64, u64);
    visit_from!(visit_i8, i8);
    visit_from!(visit_i16, i16);
    visit_from!(visit_i32, i32);
    visit_as!(visit_i64, i64);
    visit_from!(visit_f32, f32);
    visit_from!(visit_f64, f64);
}

/// How the characters are drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// With the glyph images of the glyph folder.
    Images,

    /// With the built-in Helvetica font.
    Font,
}

/// The margins of the pages.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// The left margin.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub left: Mm,

    /// The top margin.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub top: Mm,

    /// The right margin.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub right: Mm,

    /// The bottom margin.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub bottom: Mm,
}

impl Default for Margins {
    fn default() -> Margins {
        Margins {
            left: DEFAULT_MARGIN,
            top: DEFAULT_MARGIN,
            right: DEFAULT_MARGIN,
            bottom: DEFAULT_MARGIN,
        }
    }
}

/// Holds the configuration of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The title of the document.
    pub title: String,

    /// The path to the text to render, one line per line.
    pub input: String,

    /// The path to the pdf to write.
    pub output: String,

    /// The path to the folder of glyph images.
    pub glyphs: String,

    /// How the characters are drawn.
    pub mode: Mode,

    /// The paper size.
    pub paper: PaperSize,

    /// The orientation of the pages.
    pub orientation: Orientation,

    /// The height of the letters.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub letter_height: Mm,

    /// Free text printed in the footer.
    pub label: String,

    /// Where the footer goes.
    pub footer_align: Align,

    /// What to do with characters that have no glyph image.
    pub missing_glyphs: MissingGlyphPolicy,

    /// What to do with lines wider than the page.
    pub overlong_lines: OverflowPolicy,

    /// Vertical distance added between two lines.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub line_gap: Mm,

    /// Horizontal distance left after every glyph.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub glyph_gap: Mm,

    /// How far a space moves the cursor.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub space_advance: Mm,

    /// How far a character without a glyph moves the cursor.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub fallback_advance: Mm,

    /// Gives every character the same advance in font mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_advance: Option<Mm>,

    /// Whether a border is drawn around the pages.
    pub border: bool,

    /// The distance between the page edges and the border.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub border_inset: Mm,

    /// Whether lines are separated by a rule.
    pub separator: bool,

    /// The distance between the bottom edge and the footer.
    #[serde(serialize_with = "serialize_mm")]
    #[serde(deserialize_with = "deserialize_mm")]
    pub footer_offset: Mm,

    /// The margins of the pages.
    pub margins: Margins,
}

impl Default for Config {
    fn default() -> Config {
        Config::with_title("")
    }
}

impl Config {
    /// Creates a default configuration with a title.
    pub fn with_title(title: &str) -> Config {
        Config {
            title: String::from(title),
            input: String::from("main.txt"),
            output: String::from("output.pdf"),
            glyphs: String::from("letters"),
            mode: Mode::Images,
            paper: PaperSize::A3,
            orientation: Orientation::Landscape,
            letter_height: DEFAULT_LETTER_HEIGHT,
            label: String::new(),
            footer_align: Align::Center,
            missing_glyphs: MissingGlyphPolicy::Reject,
            overlong_lines: OverflowPolicy::Reject,
            line_gap: DEFAULT_LINE_GAP,
            glyph_gap: DEFAULT_GLYPH_GAP,
            space_advance: DEFAULT_SPACE_ADVANCE,
            fallback_advance: DEFAULT_FALLBACK_ADVANCE,
            font_advance: None,
            border: true,
            border_inset: DEFAULT_BORDER_INSET,
            separator: true,
            footer_offset: DEFAULT_FOOTER_OFFSET,
            margins: Margins::default(),
        }
    }

    /// Returns the size of the pages.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.paper, self.orientation)
    }

    /// Returns the layout configuration.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            margin_left: self.margins.left,
            margin_top: self.margins.top,
            margin_right: self.margins.right,
            margin_bottom: self.margins.bottom,
            line_spacing: self.letter_height,
            line_gap: self.line_gap,
            glyph_height: self.letter_height,
            glyph_gap: self.glyph_gap,
            space_advance: self.space_advance,
            fallback_advance: self.fallback_advance,
            separator_offset: if self.separator {
                Some(self.letter_height + self.line_gap / 2.0)
            } else {
                None
            },
            missing_glyphs: self.missing_glyphs,
        }
    }

    /// Returns the decorations of the pages.
    pub fn decoration(&self) -> DecorationConfig {
        let mut decoration = DecorationConfig::new(self.paper, &self.label);

        decoration.border = decoration
            .border
            .filter(|_| self.border)
            .map(|border| Border {
                inset: self.border_inset,
                ..border
            });

        decoration.footer = Some(Footer {
            offset: self.footer_offset,
            margin: self.margins.right,
            align: self.footer_align,
            ..Footer::new(self.paper, &self.label)
        });

        decoration
    }

    /// Returns the glyph source of the font mode.
    pub fn font_glyphs(&self) -> FontGlyphs {
        match self.font_advance {
            Some(advance) => FontGlyphs::monospaced(advance),
            None => FontGlyphs::helvetica(),
        }
    }

    /// Creates a renderer that draws with this configuration.
    pub fn renderer<'a>(&self, source: &'a dyn GlyphSource) -> Renderer<'a> {
        Renderer::new(
            self.geometry(),
            self.layout_config(),
            self.decoration(),
            source,
        )
        .with_overflow(self.overlong_lines)
    }
}

#[cfg(test)]
mod tests {
    use crate::document::configuration::{Config, Mode};
    use crate::layout::decorator::Align;
    use crate::layout::geometry::{Orientation, PaperSize};
    use crate::layout::MissingGlyphPolicy;
    use crate::render::OverflowPolicy;
    use crate::units::Mm;
    use crate::Result;

    #[test]
    fn empty_file_gives_defaults() -> Result<()> {
        let config: Config = toml::from_str("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.paper, PaperSize::A3);
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.letter_height, Mm(100.0));
        Ok(())
    }

    #[test]
    fn lengths_accept_integers_and_floats() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
                title = "Signs"
                letter_height = 75
                line_gap = 12.5

                [margins]
                left = 10
                bottom = 7.5
            "#,
        )?;

        assert_eq!(config.title, "Signs");
        assert_eq!(config.letter_height, Mm(75.0));
        assert_eq!(config.line_gap, Mm(12.5));
        assert_eq!(config.margins.left, Mm(10.0));
        assert_eq!(config.margins.top, Mm(20.0));
        assert_eq!(config.margins.bottom, Mm(7.5));
        Ok(())
    }

    #[test]
    fn enums_are_lowercase() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
                mode = "font"
                paper = "A4"
                orientation = "portrait"
                footer_align = "right"
                missing_glyphs = "placeholder"
                overlong_lines = "allow"
                font_advance = 30
            "#,
        )?;

        assert_eq!(config.mode, Mode::Font);
        assert_eq!(config.paper, PaperSize::A4);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.footer_align, Align::Right);
        assert_eq!(config.missing_glyphs, MissingGlyphPolicy::Placeholder);
        assert_eq!(config.overlong_lines, OverflowPolicy::Allow);
        assert_eq!(config.font_advance, Some(Mm(30.0)));
        Ok(())
    }

    #[test]
    fn unknown_paper_is_an_error() {
        assert!(toml::from_str::<Config>("paper = \"B5\"").is_err());
    }

    #[test]
    fn written_config_reads_back() -> Result<()> {
        let config = Config::with_title("Signs");
        let text = toml::to_string(&config)?;
        let read: Config = toml::from_str(&text)?;
        assert_eq!(read, config);
        Ok(())
    }

    #[test]
    fn layout_follows_the_letter_height() {
        let mut config = Config::with_title("Signs");
        config.letter_height = Mm(50.0);
        let layout = config.layout_config();

        assert_eq!(layout.glyph_height, Mm(50.0));
        assert_eq!(layout.line_pitch(), Mm(70.0));
        assert_eq!(layout.separator_offset, Some(Mm(60.0)));

        config.separator = false;
        assert_eq!(config.layout_config().separator_offset, None);
    }

    #[test]
    fn decorations_can_be_turned_off() {
        let mut config = Config::with_title("Signs");
        config.label = String::from("NCC");
        config.border_inset = Mm(3.0);

        let decoration = config.decoration();
        assert_eq!(decoration.border.map(|border| border.inset), Some(Mm(3.0)));
        assert_eq!(
            decoration.footer.map(|footer| footer.text(1, 2)),
            Some(String::from("Page 1/2 - A3 - NCC"))
        );

        config.border = false;
        assert!(config.decoration().border.is_none());
    }
}
