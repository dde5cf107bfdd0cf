//! `head`: font header.

use crate::error::{FontError, Result};
use crate::parse::{require_len, Reader};
use crate::tag::Tag;

pub const HEAD_LEN: usize = 54;
pub const HEAD_MAGIC: u32 = 0x5F0F_3CF5;

/// Encoding of the `loca` table, selected by `head.indexToLocFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaFormat {
    /// u16 offsets, stored divided by two.
    Short,
    /// u32 offsets.
    Long,
}

impl LocaFormat {
    pub fn from_raw(value: i16) -> Result<Self> {
        match value {
            0 => Ok(LocaFormat::Short),
            1 => Ok(LocaFormat::Long),
            other => Err(FontError::InvalidLocaFormat(other)),
        }
    }

    pub fn to_raw(self) -> i16 {
        match self {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        }
    }

    /// Bytes per loca entry.
    pub fn entry_size(self) -> usize {
        match self {
            LocaFormat::Short => 2,
            LocaFormat::Long => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub version: u32,
    pub font_revision: u32,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: i64,
    pub modified: i64,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: LocaFormat,
    pub glyph_data_format: i16,
}

impl Head {
    pub fn parse(data: &[u8]) -> Result<Self> {
        require_len(data, HEAD_LEN, Tag::HEAD)?;
        let mut r = Reader::new(data, Tag::HEAD);
        let head = Head {
            version: r.read_u32()?,
            font_revision: r.read_u32()?,
            checksum_adjustment: r.read_u32()?,
            magic_number: r.read_u32()?,
            flags: r.read_u16()?,
            units_per_em: r.read_u16()?,
            created: r.read_i64()?,
            modified: r.read_i64()?,
            x_min: r.read_i16()?,
            y_min: r.read_i16()?,
            x_max: r.read_i16()?,
            y_max: r.read_i16()?,
            mac_style: r.read_u16()?,
            lowest_rec_ppem: r.read_u16()?,
            font_direction_hint: r.read_i16()?,
            index_to_loc_format: LocaFormat::from_raw(r.read_i16()?)?,
            glyph_data_format: r.read_i16()?,
        };
        if head.units_per_em == 0 {
            return Err(FontError::malformed(Tag::HEAD, "unitsPerEm is zero"));
        }
        Ok(head)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEAD_LEN);
        data.extend_from_slice(&self.version.to_be_bytes());
        data.extend_from_slice(&self.font_revision.to_be_bytes());
        data.extend_from_slice(&self.checksum_adjustment.to_be_bytes());
        data.extend_from_slice(&self.magic_number.to_be_bytes());
        data.extend_from_slice(&self.flags.to_be_bytes());
        data.extend_from_slice(&self.units_per_em.to_be_bytes());
        data.extend_from_slice(&self.created.to_be_bytes());
        data.extend_from_slice(&self.modified.to_be_bytes());
        data.extend_from_slice(&self.x_min.to_be_bytes());
        data.extend_from_slice(&self.y_min.to_be_bytes());
        data.extend_from_slice(&self.x_max.to_be_bytes());
        data.extend_from_slice(&self.y_max.to_be_bytes());
        data.extend_from_slice(&self.mac_style.to_be_bytes());
        data.extend_from_slice(&self.lowest_rec_ppem.to_be_bytes());
        data.extend_from_slice(&self.font_direction_hint.to_be_bytes());
        data.extend_from_slice(&self.index_to_loc_format.to_raw().to_be_bytes());
        data.extend_from_slice(&self.glyph_data_format.to_be_bytes());
        data
    }
}
