//! `hhea`: horizontal header.

use crate::error::Result;
use crate::parse::{require_len, Reader};
use crate::tag::Tag;

pub const HHEA_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hhea {
    pub version: u32,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub reserved: [i16; 4],
    pub metric_data_format: i16,
    /// Count of explicit (advance, bearing) pairs in `hmtx`.
    pub number_of_h_metrics: u16,
}

impl Hhea {
    pub fn parse(data: &[u8]) -> Result<Self> {
        require_len(data, HHEA_LEN, Tag::HHEA)?;
        let mut r = Reader::new(data, Tag::HHEA);
        Ok(Hhea {
            version: r.read_u32()?,
            ascender: r.read_i16()?,
            descender: r.read_i16()?,
            line_gap: r.read_i16()?,
            advance_width_max: r.read_u16()?,
            min_left_side_bearing: r.read_i16()?,
            min_right_side_bearing: r.read_i16()?,
            x_max_extent: r.read_i16()?,
            caret_slope_rise: r.read_i16()?,
            caret_slope_run: r.read_i16()?,
            caret_offset: r.read_i16()?,
            reserved: [r.read_i16()?, r.read_i16()?, r.read_i16()?, r.read_i16()?],
            metric_data_format: r.read_i16()?,
            number_of_h_metrics: r.read_u16()?,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(HHEA_LEN);
        data.extend_from_slice(&self.version.to_be_bytes());
        for v in [self.ascender, self.descender, self.line_gap] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&self.advance_width_max.to_be_bytes());
        for v in [
            self.min_left_side_bearing,
            self.min_right_side_bearing,
            self.x_max_extent,
            self.caret_slope_rise,
            self.caret_slope_run,
            self.caret_offset,
        ] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        for v in self.reserved {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&self.metric_data_format.to_be_bytes());
        data.extend_from_slice(&self.number_of_h_metrics.to_be_bytes());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FontError;
    use crate::parse::{read_i16, read_u16};

    fn sample() -> Hhea {
        Hhea {
            version: 0x0001_0000,
            ascender: 800,
            descender: -200,
            line_gap: 90,
            advance_width_max: 1000,
            min_left_side_bearing: -50,
            min_right_side_bearing: -20,
            x_max_extent: 950,
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            reserved: [0; 4],
            metric_data_format: 0,
            number_of_h_metrics: 7,
        }
    }

    #[test]
    fn test_hhea_field_offsets() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), HHEA_LEN);
        assert_eq!(read_i16(&bytes, 4), 800);
        assert_eq!(read_i16(&bytes, 6), -200);
        assert_eq!(read_u16(&bytes, 34), 7);
        assert_eq!(Hhea::parse(&bytes).unwrap(), sample());
    }

    #[test]
    fn test_hhea_truncated() {
        let bytes = sample().to_bytes();
        assert!(matches!(
            Hhea::parse(&bytes[..35]),
            Err(FontError::Truncated { tag: Tag::HHEA, .. })
        ));
    }
}
