//! # Glyph Store
//!
//! `glyf` holds one variable-length record per glyph, located through
//! `loca`. A record starts with `numberOfContours` and a bounding box;
//! a negative contour count marks a composite glyph whose body is a list
//! of component records:
//!
//! ```text
//! flags: u16, glyphIndex: u16,
//! args:  2 × i8 or 2 × i16 (ARG_1_AND_2_ARE_WORDS)
//! transform: none | F2Dot14 | 2 × F2Dot14 | 4 × F2Dot14
//! ```
//!
//! continuing while `MORE_COMPONENTS` is set.

use crate::error::{FontError, Result};
use crate::parse::{read_i16, read_u16, write_u16};
use crate::tag::Tag;

use super::loca::Loca;

pub const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
pub const WE_HAVE_A_SCALE: u16 = 0x0008;
pub const MORE_COMPONENTS: u16 = 0x0020;
pub const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
pub const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

/// numberOfContours + xMin, yMin, xMax, yMax.
pub const GLYPH_HEADER_LEN: usize = 10;

/// A glyph's bounding box in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BBox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// Zero-length record (e.g. space).
    Empty,
    Simple { contours: u16 },
    Composite,
}

/// One component of a composite glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub flags: u16,
    pub glyph_id: u16,
    /// Offset of the glyphIndex field within the glyph record.
    pub glyph_id_offset: usize,
}

/// The raw `glyf` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Glyf {
    pub data: Vec<u8>,
}

impl Glyf {
    pub fn parse(data: &[u8]) -> Self {
        Glyf {
            data: data.to_vec(),
        }
    }

    /// The record of glyph `gid`, or `None` if the gid is out of range.
    ///
    /// Empty glyphs return an empty slice.
    pub fn glyph<'a>(&'a self, loca: &Loca, gid: u16) -> Option<&'a [u8]> {
        let range = loca.range(gid)?;
        self.data.get(range)
    }

    /// Check that `loca` only points inside this table.
    pub fn validate(&self, loca: &Loca) -> Result<()> {
        let end = loca.glyf_len() as usize;
        if end > self.data.len() {
            return Err(FontError::Truncated {
                tag: Tag::GLYF,
                needed: end,
                available: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Classify a glyph record.
pub fn glyph_kind(record: &[u8]) -> Result<GlyphKind> {
    if record.is_empty() {
        return Ok(GlyphKind::Empty);
    }
    if record.len() < GLYPH_HEADER_LEN {
        return Err(FontError::Truncated {
            tag: Tag::GLYF,
            needed: GLYPH_HEADER_LEN,
            available: record.len(),
        });
    }
    let contours = read_i16(record, 0);
    if contours < 0 {
        Ok(GlyphKind::Composite)
    } else {
        Ok(GlyphKind::Simple {
            contours: contours as u16,
        })
    }
}

/// The bounding box stored in a record header; `None` for empty glyphs.
pub fn glyph_bbox(record: &[u8]) -> Option<BBox> {
    if record.len() < GLYPH_HEADER_LEN {
        return None;
    }
    Some(BBox {
        x_min: read_i16(record, 2),
        y_min: read_i16(record, 4),
        x_max: read_i16(record, 6),
        y_max: read_i16(record, 8),
    })
}

/// Walk the component list of a composite record.
///
/// Returns an empty list for simple and empty glyphs.
pub fn components(record: &[u8]) -> Result<Vec<Component>> {
    if glyph_kind(record)? != GlyphKind::Composite {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    let mut pos = GLYPH_HEADER_LEN;
    loop {
        if pos + 4 > record.len() {
            return Err(FontError::malformed(
                Tag::GLYF,
                "composite glyph ends inside a component record",
            ));
        }
        let flags = read_u16(record, pos);
        found.push(Component {
            flags,
            glyph_id: read_u16(record, pos + 2),
            glyph_id_offset: pos + 2,
        });
        pos += 4;

        pos += if flags & ARG_1_AND_2_ARE_WORDS != 0 { 4 } else { 2 };

        if flags & WE_HAVE_A_SCALE != 0 {
            pos += 2;
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            pos += 4;
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            pos += 8;
        }

        if flags & MORE_COMPONENTS == 0 {
            break;
        }
    }

    if pos > record.len() {
        return Err(FontError::malformed(
            Tag::GLYF,
            "composite glyph ends inside a component record",
        ));
    }
    Ok(found)
}

/// Rewrite every component glyph ID of a composite record in place.
///
/// Only the glyphIndex fields change; flags, arguments, transforms and any
/// trailing instructions are left untouched. Components `remap` can't
/// resolve keep their old ID.
pub fn remap_components(record: &mut [u8], remap: impl Fn(u16) -> Option<u16>) -> Result<()> {
    for component in components(record)? {
        if let Some(new_gid) = remap(component.glyph_id) {
            write_u16(record, component.glyph_id_offset, new_gid);
        }
    }
    Ok(())
}
