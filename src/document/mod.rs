//! This module turns laid out pages into pdf documents.

pub mod configuration;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageXObject, IndirectFontRef, Line,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
};

use crate::fonts::Font;
use crate::glyphs::provider::GlyphProvider;
use crate::layout::constants::PLACEHOLDER_THICKNESS;
use crate::layout::engine::PlacementCommand;
use crate::layout::pages::{DrawCommand, Layout, Page, Rgb, Stroke};
use crate::layout::Mark;
use crate::units::{Mm, Pt};
use crate::{Error, Result};

/// The resolution images are embedded at before being scaled.
const IMAGE_DPI: f64 = 300.0;

/// Converts one of our colors into a printpdf color.
fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(rgb.r, rgb.g, rgb.b, None))
}

/// Flattens an image on a white background and returns it as an RGB image
/// object.
fn flatten(image: &DynamicImage) -> ImageXObject {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut image_data = Vec::with_capacity(width as usize * height as usize * 3);

    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);

        for &channel in &[r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            image_data.push(blended as u8);
        }
    }

    ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data,
        image_filter: None,
        clipping_bbox: None,
    }
}

/// Returns the baseline of a text glyph, raised so that its descenders stay
/// inside the placement box.
fn baseline(placement: &PlacementCommand) -> Mm {
    placement.y + Font::helvetica().descent(placement.height.into())
}

/// Decodes every glyph image once per document.
struct ImageCache<'a> {
    /// Where the images come from.
    provider: Option<&'a dyn GlyphProvider>,

    /// The images already decoded, `None` for those that failed.
    images: HashMap<char, Option<ImageXObject>>,

    /// The keys whose image failed to decode.
    failures: Vec<char>,
}

impl<'a> ImageCache<'a> {
    /// Returns the image of a glyph, or `None` if it cannot be decoded.
    fn get(&mut self, key: char) -> Result<Option<&ImageXObject>> {
        if !self.images.contains_key(&key) {
            let provider = self.provider.ok_or(Error::UnknownGlyph(key))?;

            let image = match provider.image(key) {
                Ok(image) => Some(flatten(&image)),
                Err(e) => {
                    warn!("cannot decode glyph {:?}: {}, it is left blank", key, e);
                    self.failures.push(key);
                    None
                }
            };

            self.images.insert(key, image);
        }

        Ok(self.images.get(&key).and_then(Option::as_ref))
    }
}

/// This struct contains the pdf document.
pub struct Document {
    /// The inner document from printpdf.
    document: PdfDocumentReference,

    /// The number of pages.
    page_count: usize,

    /// The glyphs left blank because their image failed to decode.
    skipped_glyphs: Vec<char>,
}

impl Document {
    /// Draws a layout into a new pdf document.
    ///
    /// The provider is only needed if the layout contains glyph images.
    pub fn render(
        title: &str,
        layout: &Layout,
        provider: Option<&dyn GlyphProvider>,
    ) -> Result<Document> {
        let mut pages = layout.pages.iter();
        let first = pages.next().ok_or(Error::NothingToRender)?;

        let width: printpdf::Mm = layout.geometry.width.into();
        let height: printpdf::Mm = layout.geometry.height.into();

        let (document, page, layer) = PdfDocument::new(title, width, height, "Page 1");
        let font = document.add_builtin_font(BuiltinFont::Helvetica)?;
        let mut images = ImageCache {
            provider,
            images: HashMap::new(),
            failures: vec![],
        };

        let mut writer = PageWriter {
            layer: document.get_page(page).get_layer(layer),
            font: &font,
            images: &mut images,
        };
        writer.draw(first)?;

        for content in pages {
            let name = format!("Page {}", content.number);
            let (page, layer) = document.add_page(width, height, name);
            let mut writer = PageWriter {
                layer: document.get_page(page).get_layer(layer),
                font: &font,
                images: &mut images,
            };
            writer.draw(content)?;
        }

        info!("rendered {} pages", layout.page_count());

        Ok(Document {
            document,
            page_count: layout.page_count(),
            skipped_glyphs: images.failures,
        })
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the glyphs whose image failed to decode and were left blank.
    pub fn skipped_glyphs(&self) -> &[char] {
        &self.skipped_glyphs
    }

    /// Serializes the document.
    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let mut writer = BufWriter::new(Vec::new());
        self.document.save(&mut writer)?;
        writer.into_inner().map_err(|e| Error::IoError(e.into_error()))
    }

    /// Saves the document into a file.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.document.save(&mut writer)?;
        Ok(())
    }
}

/// Draws the commands of one page on its layer.
struct PageWriter<'a, 'b> {
    /// The layer of the page.
    layer: PdfLayerReference,

    /// The built-in font.
    font: &'a IndirectFontRef,

    /// The glyph images.
    images: &'a mut ImageCache<'b>,
}

impl<'a, 'b> PageWriter<'a, 'b> {
    fn draw(&mut self, page: &Page) -> Result<()> {
        for command in &page.commands {
            match command {
                DrawCommand::Glyph(placement) => self.glyph(placement)?,

                DrawCommand::Line { from, to, stroke } => {
                    self.outline(vec![*from, *to], false, *stroke);
                }

                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    stroke,
                } => self.rectangle(*x, *y, *width, *height, *stroke),

                DrawCommand::Text { text, x, y, size } => {
                    self.layer.set_fill_color(color(Rgb::BLACK));
                    self.layer
                        .use_text(text.clone(), size.0, (*x).into(), (*y).into(), self.font);
                }
            }
        }

        Ok(())
    }

    fn glyph(&mut self, placement: &PlacementCommand) -> Result<()> {
        match placement.mark {
            Some(Mark::Image(key)) => {
                let image = match self.images.get(key)? {
                    Some(image) => image,
                    None => return Ok(()),
                };
                let natural_width = image.width.0 as f64 * 25.4 / IMAGE_DPI;
                let natural_height = image.height.0 as f64 * 25.4 / IMAGE_DPI;

                Image::from(image.clone()).add_to_layer(
                    self.layer.clone(),
                    Some(placement.x.into()),
                    Some(placement.y.into()),
                    None,
                    Some(placement.width.0 / natural_width),
                    Some(placement.height.0 / natural_height),
                    Some(IMAGE_DPI),
                );
            }

            Some(Mark::Text(c)) => {
                self.layer.set_fill_color(color(Rgb::BLACK));
                self.layer.use_text(
                    c.to_string(),
                    Pt::from(placement.height).0,
                    placement.x.into(),
                    baseline(placement).into(),
                    self.font,
                );
            }

            None => self.rectangle(
                placement.x,
                placement.y,
                placement.width,
                placement.height,
                Stroke::new(Rgb::BLACK, PLACEHOLDER_THICKNESS),
            ),
        }

        Ok(())
    }

    fn rectangle(&mut self, x: Mm, y: Mm, width: Mm, height: Mm, stroke: Stroke) {
        let corners = vec![
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ];
        self.outline(corners, true, stroke);
    }

    fn outline(&mut self, points: Vec<(Mm, Mm)>, is_closed: bool, stroke: Stroke) {
        self.layer.set_outline_color(color(stroke.color));
        self.layer.set_outline_thickness(stroke.thickness.0);

        self.layer.add_shape(Line {
            points: points
                .into_iter()
                .map(|(x, y)| (Point::new(x.into(), y.into()), false))
                .collect(),
            is_closed,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgba, RgbaImage};

    use crate::document::{baseline, flatten, Document};
    use crate::fonts::FontGlyphs;
    use crate::glyphs::provider::{GlyphDirectory, GlyphSet};
    use crate::glyphs::tests::write_png;
    use crate::glyphs::GlyphCatalog;
    use crate::layout::decorator::DecorationConfig;
    use crate::layout::engine::PlacementCommand;
    use crate::layout::geometry::{Orientation, PageGeometry, PaperSize};
    use crate::layout::pages::{DrawCommand, Layout};
    use crate::layout::{LayoutConfig, Mark};
    use crate::render::{OverflowPolicy, Renderer};
    use crate::units::{nearly_equal, Mm};
    use crate::{Error, Result};

    fn a4_renderer(catalog: &GlyphCatalog) -> Renderer {
        Renderer::new(
            PageGeometry::new(PaperSize::A4, Orientation::Portrait),
            LayoutConfig::with_glyph_height(Mm(50.0)),
            DecorationConfig::bare(),
            catalog,
        )
    }

    fn glyphs(layout: &Layout) -> Vec<PlacementCommand> {
        layout
            .pages
            .iter()
            .flat_map(|page| page.commands.iter())
            .filter_map(|command| match command {
                DrawCommand::Glyph(placement) => Some(*placement),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn transparent_pixels_become_white() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let object = flatten(&DynamicImage::ImageRgba8(image));

        assert_eq!(object.image_data, vec![255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn image_glyphs_to_pdf() {
        let set = GlyphSet::new()
            .with('H', DynamicImage::new_rgba8(20, 40))
            .with('I', DynamicImage::new_rgba8(10, 40));
        let catalog = GlyphCatalog::load(&set);
        let geometry = PageGeometry::new(PaperSize::A4, Orientation::Portrait);
        let renderer = Renderer::new(
            geometry,
            LayoutConfig::with_glyph_height(Mm(50.0)),
            DecorationConfig::new(PaperSize::A4, "NCC"),
            &catalog,
        );

        let layout = renderer.compose(&["HI", "hi"]).unwrap();
        let document = Document::render("test", &layout, Some(&set)).unwrap();
        assert_eq!(document.page_count(), 1);

        let bytes = document.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn native_font_to_pdf() {
        let glyphs = FontGlyphs::helvetica();
        let geometry = PageGeometry::new(PaperSize::A4, Orientation::Landscape);
        let renderer = Renderer::new(
            geometry,
            LayoutConfig::with_glyph_height(Mm(50.0)),
            DecorationConfig::new(PaperSize::A4, ""),
            &glyphs,
        )
        .with_overflow(OverflowPolicy::Allow);

        let lines: Vec<String> = (0..7).map(|i| format!("Line {}", i)).collect();
        let layout = renderer.compose(&lines).unwrap();
        let document = Document::render("test", &layout, None).unwrap();

        assert_eq!(document.page_count(), layout.page_count());
        assert!(document.to_bytes().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn empty_layout_is_refused() {
        let layout = Layout {
            geometry: PageGeometry::new(PaperSize::A4, Orientation::Portrait),
            pages: vec![],
        };

        assert!(matches!(
            Document::render("test", &layout, None),
            Err(Error::NothingToRender)
        ));
    }

    #[test]
    fn image_glyphs_need_a_provider() {
        let set = GlyphSet::new().with('A', DynamicImage::new_rgba8(10, 10));
        let catalog = GlyphCatalog::load(&set);
        let renderer = Renderer::new(
            PageGeometry::new(PaperSize::A4, Orientation::Portrait),
            LayoutConfig::with_glyph_height(Mm(50.0)),
            DecorationConfig::bare(),
            &catalog,
        );

        let layout = renderer.compose(&["A"]).unwrap();

        assert!(matches!(
            Document::render("test", &layout, None),
            Err(Error::UnknownGlyph('A'))
        ));
    }

    #[test]
    fn corrupt_glyph_image_advances_by_the_fallback() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_png(&dir.path().join("A.png"), true)?;
        write_png(&dir.path().join("B.png"), false)?;

        let directory = GlyphDirectory::open(dir.path())?;
        let catalog = GlyphCatalog::load(&directory);
        let layout = a4_renderer(&catalog).compose(&["AB"])?;

        // Only 'B' is drawn, after the 50 mm fallback advance of 'A'.
        let placements = glyphs(&layout);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].mark, Some(Mark::Image('B')));
        assert_eq!(placements[0].x, Mm(70.0));

        let document = Document::render("test", &layout, Some(&directory))?;
        assert!(document.skipped_glyphs().is_empty());
        assert!(document.to_bytes()?.starts_with(b"%PDF"));

        Ok(())
    }

    #[test]
    fn glyph_failing_at_render_time_is_left_blank() -> Result<()> {
        let set = GlyphSet::new()
            .with('A', DynamicImage::new_rgba8(10, 10))
            .with('B', DynamicImage::new_rgba8(10, 10));
        let catalog = GlyphCatalog::load(&set);
        let layout = a4_renderer(&catalog).compose(&["AB", "BA"])?;

        let partial = GlyphSet::new().with('B', DynamicImage::new_rgba8(10, 10));
        let document = Document::render("test", &layout, Some(&partial))?;

        assert_eq!(document.skipped_glyphs(), &['A']);
        assert_eq!(document.page_count(), 1);

        Ok(())
    }

    #[test]
    fn text_baseline_leaves_room_for_descenders() {
        let placement = PlacementCommand {
            mark: Some(Mark::Text('g')),
            x: Mm(20.0),
            y: Mm(30.0),
            width: Mm(55.6),
            height: Mm(100.0),
        };

        // Helvetica descends 207/1000 em below the baseline.
        assert!(nearly_equal(baseline(&placement).0, 30.0 + 20.7));
    }
}
