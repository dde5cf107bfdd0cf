//! # truetype-subset
//!
//! A TrueType font engine for PDF embedding: parses an sfnt file, works
//! out which glyphs a piece of text needs (following composite glyphs to
//! their components) and writes a minimal, checksummed font containing
//! only those glyphs.
//!
//! ## Architecture
//!
//! ```text
//! Font bytes
//!       ↓
//!   [sfnt]      — Offset table + table directory
//!       ↓
//!   [tables]    — Per-table codecs → TableSet
//!       ↓
//!   [subset]    — Resolve glyph closure, renumber, regenerate tables
//!       ↓
//!   [sfnt]      — Sorted, padded, checksummed output
//! ```
//!
//! ```no_run
//! use truetype_subset::{FontSubsetter, TrueTypeFont};
//!
//! let font = TrueTypeFont::load(std::fs::read("Inter.ttf")?)?;
//! let subset = FontSubsetter::new(&font).subset_text("Hello")?;
//! std::fs::write("Inter-subset.ttf", &subset.font_data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod font;
pub mod options;
pub mod parse;
pub mod sfnt;
pub mod subset;
pub mod tables;
pub mod tag;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, FontError, Result};
pub use font::{FontMetrics, TrueTypeFont};
pub use options::{LoadOptions, SubsetOptions};
pub use subset::{FontSubsetter, GlyphRemap, SubsetResult};
pub use tag::Tag;

/// Load `data` and subset it to the characters of `text` in one call.
pub fn subset_font(data: Vec<u8>, text: &str) -> Result<SubsetResult> {
    let font = TrueTypeFont::load(data)?;
    FontSubsetter::new(&font).subset_text(text)
}
