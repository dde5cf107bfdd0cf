//! `OS/2`: OS/2 and Windows metrics.
//!
//! Versions 0 through 5 are supported; each version appends fields to the
//! previous one.

use crate::error::{FontError, Result};
use crate::parse::{require_len, Reader};
use crate::tag::Tag;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Os2 {
    pub version: u16,
    pub x_avg_char_width: i16,
    pub us_weight_class: u16,
    pub us_width_class: u16,
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    pub y_strikeout_size: i16,
    pub y_strikeout_position: i16,
    pub s_family_class: i16,
    pub panose: [u8; 10],
    pub ul_unicode_range: [u32; 4],
    pub ach_vend_id: [u8; 4],
    pub fs_selection: u16,
    pub us_first_char_index: u16,
    pub us_last_char_index: u16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub s_typo_line_gap: i16,
    pub us_win_ascent: u16,
    pub us_win_descent: u16,
    /// Version 1+.
    pub ul_code_page_range: [u32; 2],
    /// Version 2+.
    pub sx_height: i16,
    pub s_cap_height: i16,
    pub us_default_char: u16,
    pub us_break_char: u16,
    pub us_max_context: u16,
    /// Version 5.
    pub us_lower_optical_point_size: u16,
    pub us_upper_optical_point_size: u16,
}

/// fsSelection bit 7: prefer the typographic metrics.
pub const USE_TYPO_METRICS: u16 = 1 << 7;
/// fsSelection bit 0.
pub const ITALIC: u16 = 1;

impl Os2 {
    /// Minimum table length for `version`.
    pub fn expected_len(version: u16) -> usize {
        match version {
            0 => 78,
            1 => 86,
            2..=4 => 96,
            _ => 100,
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data, Tag::OS2);
        let version = r.read_u16()?;
        if version > 5 {
            return Err(FontError::malformed(Tag::OS2, format!("unknown version {version}")));
        }
        require_len(data, Self::expected_len(version), Tag::OS2)?;

        let mut os2 = Os2 {
            version,
            x_avg_char_width: r.read_i16()?,
            us_weight_class: r.read_u16()?,
            us_width_class: r.read_u16()?,
            fs_type: r.read_u16()?,
            y_subscript_x_size: r.read_i16()?,
            y_subscript_y_size: r.read_i16()?,
            y_subscript_x_offset: r.read_i16()?,
            y_subscript_y_offset: r.read_i16()?,
            y_superscript_x_size: r.read_i16()?,
            y_superscript_y_size: r.read_i16()?,
            y_superscript_x_offset: r.read_i16()?,
            y_superscript_y_offset: r.read_i16()?,
            y_strikeout_size: r.read_i16()?,
            y_strikeout_position: r.read_i16()?,
            s_family_class: r.read_i16()?,
            ..Default::default()
        };
        os2.panose.copy_from_slice(r.read_bytes(10)?);
        for range in os2.ul_unicode_range.iter_mut() {
            *range = r.read_u32()?;
        }
        os2.ach_vend_id.copy_from_slice(r.read_bytes(4)?);
        os2.fs_selection = r.read_u16()?;
        os2.us_first_char_index = r.read_u16()?;
        os2.us_last_char_index = r.read_u16()?;
        os2.s_typo_ascender = r.read_i16()?;
        os2.s_typo_descender = r.read_i16()?;
        os2.s_typo_line_gap = r.read_i16()?;
        os2.us_win_ascent = r.read_u16()?;
        os2.us_win_descent = r.read_u16()?;

        if version >= 1 {
            os2.ul_code_page_range = [r.read_u32()?, r.read_u32()?];
        }
        if version >= 2 {
            os2.sx_height = r.read_i16()?;
            os2.s_cap_height = r.read_i16()?;
            os2.us_default_char = r.read_u16()?;
            os2.us_break_char = r.read_u16()?;
            os2.us_max_context = r.read_u16()?;
        }
        if version >= 5 {
            os2.us_lower_optical_point_size = r.read_u16()?;
            os2.us_upper_optical_point_size = r.read_u16()?;
        }
        Ok(os2)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::expected_len(self.version));
        data.extend_from_slice(&self.version.to_be_bytes());
        data.extend_from_slice(&self.x_avg_char_width.to_be_bytes());
        data.extend_from_slice(&self.us_weight_class.to_be_bytes());
        data.extend_from_slice(&self.us_width_class.to_be_bytes());
        data.extend_from_slice(&self.fs_type.to_be_bytes());
        for v in [
            self.y_subscript_x_size,
            self.y_subscript_y_size,
            self.y_subscript_x_offset,
            self.y_subscript_y_offset,
            self.y_superscript_x_size,
            self.y_superscript_y_size,
            self.y_superscript_x_offset,
            self.y_superscript_y_offset,
            self.y_strikeout_size,
            self.y_strikeout_position,
            self.s_family_class,
        ] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        data.extend_from_slice(&self.panose);
        for range in self.ul_unicode_range {
            data.extend_from_slice(&range.to_be_bytes());
        }
        data.extend_from_slice(&self.ach_vend_id);
        data.extend_from_slice(&self.fs_selection.to_be_bytes());
        data.extend_from_slice(&self.us_first_char_index.to_be_bytes());
        data.extend_from_slice(&self.us_last_char_index.to_be_bytes());
        data.extend_from_slice(&self.s_typo_ascender.to_be_bytes());
        data.extend_from_slice(&self.s_typo_descender.to_be_bytes());
        data.extend_from_slice(&self.s_typo_line_gap.to_be_bytes());
        data.extend_from_slice(&self.us_win_ascent.to_be_bytes());
        data.extend_from_slice(&self.us_win_descent.to_be_bytes());

        if self.version >= 1 {
            for range in self.ul_code_page_range {
                data.extend_from_slice(&range.to_be_bytes());
            }
        }
        if self.version >= 2 {
            data.extend_from_slice(&self.sx_height.to_be_bytes());
            data.extend_from_slice(&self.s_cap_height.to_be_bytes());
            data.extend_from_slice(&self.us_default_char.to_be_bytes());
            data.extend_from_slice(&self.us_break_char.to_be_bytes());
            data.extend_from_slice(&self.us_max_context.to_be_bytes());
        }
        if self.version >= 5 {
            data.extend_from_slice(&self.us_lower_optical_point_size.to_be_bytes());
            data.extend_from_slice(&self.us_upper_optical_point_size.to_be_bytes());
        }
        data
    }

    pub fn use_typo_metrics(&self) -> bool {
        self.fs_selection & USE_TYPO_METRICS != 0
    }
}
