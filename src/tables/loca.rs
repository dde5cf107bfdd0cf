//! `loca`: glyph offsets into `glyf`.

use crate::error::{FontError, Result};
use crate::parse::Reader;
use crate::tag::Tag;

use super::head::LocaFormat;

/// Largest glyf length a short-format loca can address.
pub const SHORT_LOCA_LIMIT: u32 = 0x1FFFE;

/// `numGlyphs + 1` byte offsets; glyph `i` spans `offsets[i]..offsets[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Loca {
    pub offsets: Vec<u32>,
}

impl Loca {
    pub fn parse(data: &[u8], format: LocaFormat, num_glyphs: u16) -> Result<Self> {
        let count = num_glyphs as usize + 1;
        let mut r = Reader::new(data, Tag::LOCA);
        let mut offsets = Vec::with_capacity(count);
        for _ in 0..count {
            let offset = match format {
                LocaFormat::Short => r.read_u16()? as u32 * 2,
                LocaFormat::Long => r.read_u32()?,
            };
            if let Some(&prev) = offsets.last() {
                if offset < prev {
                    return Err(FontError::malformed(
                        Tag::LOCA,
                        format!("offset {} decreases after {}", offset, prev),
                    ));
                }
            }
            offsets.push(offset);
        }
        Ok(Loca { offsets })
    }

    /// Number of glyphs described.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of glyph `gid` in `glyf`.
    pub fn range(&self, gid: u16) -> Option<std::ops::Range<usize>> {
        let idx = gid as usize;
        let start = *self.offsets.get(idx)? as usize;
        let end = *self.offsets.get(idx + 1)? as usize;
        Some(start..end)
    }

    /// Length of the glyf data the offsets describe.
    pub fn glyf_len(&self) -> u32 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Whether every offset can be stored in the short format.
    pub fn fits_short(&self) -> bool {
        self.offsets
            .iter()
            .all(|&o| o % 2 == 0 && o <= SHORT_LOCA_LIMIT)
    }

    pub fn to_bytes(&self, format: LocaFormat) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.offsets.len() * format.entry_size());
        for &offset in &self.offsets {
            match format {
                LocaFormat::Short => data.extend_from_slice(&((offset / 2) as u16).to_be_bytes()),
                LocaFormat::Long => data.extend_from_slice(&offset.to_be_bytes()),
            }
        }
        data
    }
}
