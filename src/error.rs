//! Structured error types for font loading and subsetting.
//!
//! Every failure falls into one of three categories (see [`ErrorKind`]):
//! the container is corrupt, the font uses something we don't support, or a
//! table the engine cannot work without is absent. None of them are
//! recoverable inside the engine; callers fall back to embedding the
//! original font.

use crate::tag::Tag;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FontError>;

/// The unified error type returned by all public API functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    /// The scalar tag at the start of the file isn't a known sfnt version.
    #[error("not a valid font (scalar tag 0x{scalar:08X})")]
    NotAFont { scalar: u32 },

    /// A structure ends before its format says it should.
    #[error("'{tag}' is truncated: needed {needed} bytes, {available} available")]
    Truncated {
        tag: Tag,
        needed: usize,
        available: usize,
    },

    /// Data is present but internally inconsistent.
    #[error("malformed '{tag}' table: {reason}")]
    Malformed { tag: Tag, reason: String },

    /// CFF ("OTTO") outlines.
    #[error("unsupported outline format: CFF/PostScript outlines are not supported")]
    UnsupportedOutlines,

    #[error("unsupported cmap subtable format {0}")]
    UnsupportedCmapFormat(u16),

    #[error("no suitable cmap encoding")]
    NoSuitableCmap,

    #[error("unsupported indexToLocFormat {0}")]
    InvalidLocaFormat(i16),

    /// One of head/hhea/maxp/cmap/hmtx/loca/glyf is absent.
    #[error("missing table '{0}'")]
    MissingTable(Tag),

    /// A composite glyph names a component outside the font's glyph range.
    #[error("glyph {glyph} references nonexistent component glyph {component}")]
    InvalidGlyphReference { glyph: u16, component: u16 },
}

/// The coarse category of a [`FontError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The font is corrupt.
    Malformed,
    /// The font is well formed but uses a feature we don't handle.
    Unsupported,
    /// A required table is absent.
    MissingTable,
}

impl FontError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FontError::NotAFont { .. }
            | FontError::Truncated { .. }
            | FontError::Malformed { .. }
            | FontError::InvalidGlyphReference { .. } => ErrorKind::Malformed,
            FontError::UnsupportedOutlines
            | FontError::UnsupportedCmapFormat(_)
            | FontError::NoSuitableCmap
            | FontError::InvalidLocaFormat(_) => ErrorKind::Unsupported,
            FontError::MissingTable(_) => ErrorKind::MissingTable,
        }
    }

    pub(crate) fn malformed(tag: Tag, reason: impl Into<String>) -> Self {
        FontError::Malformed {
            tag,
            reason: reason.into(),
        }
    }
}
