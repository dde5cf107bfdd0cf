//! `post`: PostScript information.
//!
//! Only the fixed header is interpreted. Glyph-name data that follows it
//! (format 2.0) is kept as opaque bytes.

use crate::error::Result;
use crate::parse::{require_len, Reader};
use crate::tag::Tag;

pub const POST_HEADER_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub version: u32,
    /// 16.16 fixed, degrees counter-clockwise from vertical.
    pub italic_angle: i32,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    pub glyph_names: Vec<u8>,
}

impl Post {
    pub fn parse(data: &[u8]) -> Result<Self> {
        require_len(data, POST_HEADER_LEN, Tag::POST)?;
        let mut r = Reader::new(data, Tag::POST);
        Ok(Post {
            version: r.read_u32()?,
            italic_angle: r.read_i32()?,
            underline_position: r.read_i16()?,
            underline_thickness: r.read_i16()?,
            is_fixed_pitch: r.read_u32()?,
            min_mem_type42: r.read_u32()?,
            max_mem_type42: r.read_u32()?,
            min_mem_type1: r.read_u32()?,
            max_mem_type1: r.read_u32()?,
            glyph_names: data[POST_HEADER_LEN..].to_vec(),
        })
    }

    pub fn italic_angle_degrees(&self) -> f32 {
        self.italic_angle as f32 / 65536.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(POST_HEADER_LEN + self.glyph_names.len());
        data.extend_from_slice(&self.version.to_be_bytes());
        data.extend_from_slice(&self.italic_angle.to_be_bytes());
        data.extend_from_slice(&self.underline_position.to_be_bytes());
        data.extend_from_slice(&self.underline_thickness.to_be_bytes());
        for v in [
            self.is_fixed_pitch,
            self.min_mem_type42,
            self.max_mem_type42,
            self.min_mem_type1,
            self.max_mem_type1,
        ] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&self.glyph_names);
        data
    }
}
