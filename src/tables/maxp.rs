//! `maxp`: maximum profile.
//!
//! Version 0.5 carries only the glyph count. Version 1.0 adds the TrueType
//! limits, which subsetting keeps verbatim since they stay valid upper
//! bounds for a subset of the same glyphs.

use crate::error::{FontError, Result};
use crate::parse::Reader;
use crate::tag::Tag;

pub const MAXP_V05: u32 = 0x0000_5000;
pub const MAXP_V10: u32 = 0x0001_0000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maxp {
    pub version: u32,
    pub num_glyphs: u16,
    /// Present for version 1.0 tables.
    pub limits: Option<MaxpLimits>,
}

/// The version 1.0 fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxpLimits {
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}

impl Maxp {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data, Tag::MAXP);
        let version = r.read_u32()?;
        let num_glyphs = r.read_u16()?;
        if num_glyphs == 0 {
            return Err(FontError::malformed(Tag::MAXP, "font has no glyphs"));
        }

        let limits = if version == MAXP_V10 {
            Some(MaxpLimits {
                max_points: r.read_u16()?,
                max_contours: r.read_u16()?,
                max_composite_points: r.read_u16()?,
                max_composite_contours: r.read_u16()?,
                max_zones: r.read_u16()?,
                max_twilight_points: r.read_u16()?,
                max_storage: r.read_u16()?,
                max_function_defs: r.read_u16()?,
                max_instruction_defs: r.read_u16()?,
                max_stack_elements: r.read_u16()?,
                max_size_of_instructions: r.read_u16()?,
                max_component_elements: r.read_u16()?,
                max_component_depth: r.read_u16()?,
            })
        } else {
            None
        };

        Ok(Maxp {
            version,
            num_glyphs,
            limits,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(32);
        match self.limits {
            Some(l) => {
                data.extend_from_slice(&MAXP_V10.to_be_bytes());
                data.extend_from_slice(&self.num_glyphs.to_be_bytes());
                for v in [
                    l.max_points,
                    l.max_contours,
                    l.max_composite_points,
                    l.max_composite_contours,
                    l.max_zones,
                    l.max_twilight_points,
                    l.max_storage,
                    l.max_function_defs,
                    l.max_instruction_defs,
                    l.max_stack_elements,
                    l.max_size_of_instructions,
                    l.max_component_elements,
                    l.max_component_depth,
                ] {
                    data.extend_from_slice(&v.to_be_bytes());
                }
            }
            None => {
                data.extend_from_slice(&MAXP_V05.to_be_bytes());
                data.extend_from_slice(&self.num_glyphs.to_be_bytes());
            }
        }
        data
    }
}
