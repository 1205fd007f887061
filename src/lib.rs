//! This crate contains all the tools we need to turn lines of text into
//! paginated pdf documents, drawn either with hand-lettered glyph images or
//! with a native font.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod document;
pub mod fonts;
pub mod glyphs;
pub mod layout;
pub mod render;
pub mod units;

use std::path::PathBuf;
use std::{error, fmt, io, result};

use crate::layout::validation::Report;

macro_rules! impl_from_error {
    ($type: ty, $variant: path, $from: ty) => {
        impl From<$from> for $type {
            fn from(e: $from) -> $type {
                $variant(e)
            }
        }
    };
}

/// The error type of the library.
#[derive(Debug)]
pub enum Error {
    /// Cannot read current directory.
    CannotReadCurrentDir,

    /// No handletter.toml was found.
    NoConfigFile,

    /// Error while dealing with printpdf.
    PrintpdfError(printpdf::errors::Error),

    /// Error while decoding a glyph image.
    ImageError(image::ImageError),

    /// The configuration file could not be parsed.
    TomlError(toml::de::Error),

    /// The configuration could not be serialized.
    TomlSerError(toml::ser::Error),

    /// The folder holding the glyph images does not exist.
    GlyphDirectoryNotFound(PathBuf),

    /// The page is too small for the margins and the glyph height, not a
    /// single line can be laid out.
    DegenerateGeometry(String),

    /// The pre-flight validation found problems and the policy forbids
    /// rendering.
    Rejected(Report),

    /// The layout has no page to render.
    NothingToRender,

    /// A placement refers to a glyph the provider cannot deliver.
    UnknownGlyph(char),

    /// Another io error occured.
    IoError(io::Error),
}

impl_from_error!(Error, Error::PrintpdfError, printpdf::errors::Error);
impl_from_error!(Error, Error::ImageError, image::ImageError);
impl_from_error!(Error, Error::TomlError, toml::de::Error);
impl_from_error!(Error, Error::TomlSerError, toml::ser::Error);
impl_from_error!(Error, Error::IoError, io::Error);

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CannotReadCurrentDir => write!(fmt, "cannot read current directory"),
            Error::NoConfigFile => write!(fmt, "no handletter.toml was found"),
            Error::PrintpdfError(e) => write!(fmt, "printpdf error: {}", e),
            Error::ImageError(e) => write!(fmt, "image error: {}", e),
            Error::TomlError(e) => write!(fmt, "cannot parse configuration: {}", e),
            Error::TomlSerError(e) => write!(fmt, "cannot write configuration: {}", e),
            Error::GlyphDirectoryNotFound(path) => write!(
                fmt,
                "glyph folder \"{}\" not found, please add the letter images first",
                path.display()
            ),
            Error::DegenerateGeometry(reason) => write!(fmt, "page cannot hold a line: {}", reason),
            Error::Rejected(report) => write!(fmt, "document rejected\n{}", report),
            Error::NothingToRender => write!(fmt, "there is no line to render"),
            Error::UnknownGlyph(c) => write!(fmt, "no glyph image for {:?}", c),
            Error::IoError(e) => write!(fmt, "an io error occured: {}", e),
        }
    }
}

impl error::Error for Error {}

/// The result type of the library.
pub type Result<T> = result::Result<T, Error>;
