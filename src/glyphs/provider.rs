//! Where glyph images come from.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::{Error, Result};

/// A read-only store of glyph images, keyed by character.
pub trait GlyphProvider {
    /// Returns every character the provider holds an image for.
    fn characters(&self) -> Vec<char>;

    /// Decodes the image stored for `key`.
    fn image(&self, key: char) -> Result<DynamicImage>;
}

/// The extensions of glyph image files.
const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Returns the character a glyph file stands for, if its name is `<char>.png`
/// or `<char>.jpg`.
fn glyph_key(path: &Path) -> Option<char> {
    let extension = path.extension()?.to_str()?;
    if !EXTENSIONS.iter().any(|e| extension.eq_ignore_ascii_case(e)) {
        return None;
    }

    let mut chars = path.file_stem()?.to_str()?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// A folder of `<char>.png` files, such as `A.png` or `7.png`. JPEG files
/// are read too, but a PNG wins over a JPEG of the same character.
///
/// The folder is scanned once when it is opened; files added afterwards are
/// not seen.
#[derive(Debug, Clone)]
pub struct GlyphDirectory {
    /// The image file of each character.
    files: BTreeMap<char, PathBuf>,
}

impl GlyphDirectory {
    /// Scans a folder for glyph images.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<GlyphDirectory> {
        let root = path.as_ref().to_owned();

        if !root.is_dir() {
            return Err(Error::GlyphDirectoryNotFound(root));
        }

        let mut paths = fs::read_dir(&root)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;

        // "A.jpeg" < "A.jpg" < "A.png": the PNG is inserted last.
        paths.sort();

        let mut files = BTreeMap::new();

        for path in paths {
            if !path.is_file() {
                continue;
            }

            match glyph_key(&path) {
                Some(c) => {
                    files.insert(c, path);
                }
                None => trace!("ignoring {}", path.display()),
            }
        }

        debug!("found {} glyph images in {}", files.len(), root.display());

        Ok(GlyphDirectory { files })
    }

    /// Returns the path of the image of a character, if any.
    pub fn path(&self, key: char) -> Option<&Path> {
        self.files.get(&key).map(PathBuf::as_path)
    }

    fn existing(&self, key: char) -> Result<&Path> {
        self.path(key).ok_or(Error::UnknownGlyph(key))
    }
}

impl GlyphProvider for GlyphDirectory {
    fn characters(&self) -> Vec<char> {
        self.files.keys().copied().collect()
    }

    fn image(&self, key: char) -> Result<DynamicImage> {
        Ok(image::open(self.existing(key)?)?)
    }
}

/// An in-memory set of glyph images.
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    images: BTreeMap<char, DynamicImage>,
}

impl GlyphSet {
    /// Creates an empty set.
    pub fn new() -> GlyphSet {
        GlyphSet::default()
    }

    /// Adds or replaces the image of a character.
    pub fn insert(&mut self, key: char, image: DynamicImage) {
        self.images.insert(key, image);
    }

    /// Adds the image of a character and returns the set.
    pub fn with(mut self, key: char, image: DynamicImage) -> GlyphSet {
        self.insert(key, image);
        self
    }
}

impl GlyphProvider for GlyphSet {
    fn characters(&self) -> Vec<char> {
        self.images.keys().copied().collect()
    }

    fn image(&self, key: char) -> Result<DynamicImage> {
        self.images.get(&key).cloned().ok_or(Error::UnknownGlyph(key))
    }
}
