//! This module contains everything that helps us dealing with glyph images.

pub mod provider;

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use crate::glyphs::provider::GlyphProvider;
use crate::layout::{GlyphSource, LayoutConfig, Mark, Resolution};
use crate::units::Mm;

/// The metadata of a glyph image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// The character the image is stored under.
    pub character: char,

    /// The width of the image, in pixels.
    pub pixel_width: u32,

    /// The height of the image, in pixels.
    pub pixel_height: u32,
}

impl Glyph {
    /// Returns the width over height ratio of the image.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.pixel_width) / f64::from(self.pixel_height)
    }

    /// Returns the width of the glyph once scaled to a height.
    pub fn draw_width(&self, height: Mm) -> Mm {
        height * self.aspect_ratio()
    }
}

/// The outcome of a catalog lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A glyph was found.
    Found(&'a Glyph),

    /// An image exists under this key but could not be decoded.
    Undecodable(char),

    /// No image for this character, in any case.
    Absent,
}

/// Returns the only char of an iterator, if it yields exactly one.
fn single<I: Iterator<Item = char>>(mut chars: I) -> Option<char> {
    let first = chars.next()?;
    match chars.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// The keys tried for a character: as given, then uppercase, then lowercase.
fn candidates(c: char) -> impl Iterator<Item = char> {
    let upper = single(c.to_uppercase()).filter(|&u| u != c);
    let lower = single(c.to_lowercase()).filter(|&l| l != c);
    iter::once(c).chain(upper).chain(lower)
}

/// A snapshot of the glyphs of a provider.
///
/// It is built once per render request, and never touches the provider
/// again, so lookups are deterministic.
#[derive(Debug, Clone, Default)]
pub struct GlyphCatalog {
    /// The glyphs whose image could be decoded.
    glyphs: BTreeMap<char, Glyph>,

    /// The keys whose image could not be decoded.
    undecodable: BTreeSet<char>,
}

impl GlyphCatalog {
    /// Decodes every image of a provider and keeps its size.
    ///
    /// An image that cannot be decoded, or has no pixel, is recorded as
    /// undecodable instead of failing the load.
    pub fn load<P: GlyphProvider + ?Sized>(provider: &P) -> GlyphCatalog {
        let mut catalog = GlyphCatalog::default();

        for key in provider.characters() {
            let image = match provider.image(key) {
                Ok(image) => image,
                Err(e) => {
                    warn!("cannot decode glyph {:?}: {}", key, e);
                    catalog.undecodable.insert(key);
                    continue;
                }
            };

            let (pixel_width, pixel_height) = (image.width(), image.height());

            if pixel_width == 0 || pixel_height == 0 {
                warn!("glyph {:?} is an empty image, it will be skipped", key);
                catalog.undecodable.insert(key);
                continue;
            }

            catalog.glyphs.insert(
                key,
                Glyph {
                    character: key,
                    pixel_width,
                    pixel_height,
                },
            );
        }

        debug!(
            "glyph catalog loaded: {} glyphs, {} decode failures",
            catalog.glyphs.len(),
            catalog.undecodable.len()
        );

        catalog
    }

    /// Looks a character up, trying it as given, then in uppercase, then in
    /// lowercase. The first key the provider had wins.
    pub fn lookup(&self, c: char) -> Lookup {
        for key in candidates(c) {
            if let Some(glyph) = self.glyphs.get(&key) {
                return Lookup::Found(glyph);
            }

            if self.undecodable.contains(&key) {
                return Lookup::Undecodable(key);
            }
        }

        Lookup::Absent
    }

    /// Returns the keys whose image could not be decoded.
    pub fn decode_failures(&self) -> Vec<char> {
        self.undecodable.iter().copied().collect()
    }

    /// Returns the number of usable glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if there is no usable glyph.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for GlyphCatalog {
    fn resolve(&self, c: char, config: &LayoutConfig) -> Resolution {
        if c == ' ' {
            return Resolution::Space;
        }

        match self.lookup(c) {
            Lookup::Found(glyph) => Resolution::Glyph {
                mark: Mark::Image(glyph.character),
                width: glyph.draw_width(config.glyph_height),
            },
            Lookup::Undecodable(_) => Resolution::Undecodable,
            Lookup::Absent => Resolution::Absent,
        }
    }
}
