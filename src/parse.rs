//! Big-endian byte helpers shared by the table codecs.
//!
//! Reading goes through [`Reader`], which bounds-checks every access and
//! reports which table ran short. Writing is plain `Vec<u8>` appends plus
//! the in-place patch helpers below.

use crate::error::{FontError, Result};
use crate::tag::Tag;

/// A forward-only cursor over one table's bytes.
#[derive(Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    tag: Tag,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8], tag: Tag) -> Self {
        Self { data, pos: 0, tag }
    }

    /// A reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize, tag: Tag) -> Result<Self> {
        if offset > data.len() {
            return Err(FontError::Truncated {
                tag,
                needed: offset,
                available: data.len(),
            });
        }
        Ok(Self {
            data,
            pos: offset,
            tag,
        })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(FontError::Truncated {
                tag: self.tag,
                needed: self.pos.saturating_add(len),
                available: self.data.len(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_array().map(i64::from_be_bytes)
    }

    pub fn read_tag(&mut self) -> Result<Tag> {
        self.read_array().map(Tag)
    }
}

/// Fail with `Truncated` unless `data` holds at least `needed` bytes.
pub fn require_len(data: &[u8], needed: usize, tag: Tag) -> Result<()> {
    if data.len() < needed {
        return Err(FontError::Truncated {
            tag,
            needed,
            available: data.len(),
        });
    }
    Ok(())
}

// ─── Unchecked helpers ──────────────────────────────────────────
//
// Callers must have validated `offset + size <= data.len()`.

pub fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

pub fn read_i16(data: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([data[offset], data[offset + 1]])
}

pub fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

pub fn write_u16(data: &mut [u8], offset: usize, val: u16) {
    data[offset..offset + 2].copy_from_slice(&val.to_be_bytes());
}

pub fn write_u32(data: &mut [u8], offset: usize, val: u32) {
    data[offset..offset + 4].copy_from_slice(&val.to_be_bytes());
}

/// Round up to the next multiple of four.
pub fn round4(len: usize) -> usize {
    (len + 3) & !3
}

/// Zero-pad `data` to a 4-byte boundary.
pub fn pad4(data: &mut Vec<u8>) {
    data.resize(round4(data.len()), 0);
}
