//! # Font Facade
//!
//! [`TrueTypeFont`] owns a font file and its parsed tables. It is immutable
//! after loading, so one instance can serve any number of concurrent
//! [`FontSubsetter`](crate::FontSubsetter) calls and text measurements.

use std::hash::{Hash, Hasher};

use crate::error::Result;
use crate::options::LoadOptions;
use crate::tables::glyf::{self, BBox};
use crate::tables::name::{NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POSTSCRIPT};
use crate::tables::os2::Os2;
use crate::tables::TableSet;

/// Font-wide metrics, in font units unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub line_gap: i16,
    pub cap_height: i16,
    pub x_height: i16,
    /// Degrees counter-clockwise from vertical.
    pub italic_angle: f32,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub is_fixed_pitch: bool,
    pub weight_class: u16,
    pub bbox: BBox,
}

impl FontMetrics {
    fn from_tables(tables: &TableSet) -> Self {
        let head = &tables.head;
        let upem = head.units_per_em;

        let typo = tables
            .os2
            .as_ref()
            .filter(|os2| os2.s_typo_ascender != 0 || os2.s_typo_descender != 0);
        let (ascent, descent, line_gap) = match typo {
            Some(os2) => (os2.s_typo_ascender, os2.s_typo_descender, os2.s_typo_line_gap),
            None => (
                tables.hhea.ascender,
                tables.hhea.descender,
                tables.hhea.line_gap,
            ),
        };

        let os2_value = |pick: fn(&Os2) -> i16| {
            tables.os2.as_ref().map(pick).filter(|&v| v != 0)
        };
        let cap_height = os2_value(|os2| os2.s_cap_height)
            .unwrap_or_else(|| (upem as f32 * 0.7).round() as i16);
        let x_height = os2_value(|os2| os2.sx_height)
            .unwrap_or_else(|| (upem as f32 * 0.5).round() as i16);

        let post = tables.post.as_ref();
        FontMetrics {
            units_per_em: upem,
            ascent,
            descent,
            line_gap,
            cap_height,
            x_height,
            italic_angle: post.map_or(0.0, |p| p.italic_angle_degrees()),
            underline_position: post.map_or(0, |p| p.underline_position),
            underline_thickness: post.map_or(0, |p| p.underline_thickness),
            is_fixed_pitch: post.is_some_and(|p| p.is_fixed_pitch != 0),
            weight_class: tables.os2.as_ref().map_or(400, |os2| os2.us_weight_class),
            bbox: BBox {
                x_min: head.x_min,
                y_min: head.y_min,
                x_max: head.x_max,
                y_max: head.y_max,
            },
        }
    }
}

/// A loaded TrueType font.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Vec<u8>,
    tables: TableSet,
    metrics: FontMetrics,
    hash: u64,
}

impl TrueTypeFont {
    /// Parse and validate a TrueType file.
    pub fn load(data: Vec<u8>) -> Result<Self> {
        Self::load_with_options(data, &LoadOptions::default())
    }

    pub fn load_with_options(data: Vec<u8>, options: &LoadOptions) -> Result<Self> {
        let tables = TableSet::parse(&data, options)?;
        let metrics = FontMetrics::from_tables(&tables);
        let hash = content_hash(&data);
        log::debug!(
            "loaded font: {} glyphs, {} units/em, {} bytes",
            tables.num_glyphs(),
            metrics.units_per_em,
            data.len()
        );
        Ok(TrueTypeFont {
            data,
            tables,
            metrics,
            hash,
        })
    }

    /// The original file bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Hash of a sample of the file contents; equal fonts hash equal.
    pub fn content_hash(&self) -> u64 {
        self.hash
    }

    pub fn num_glyphs(&self) -> u16 {
        self.tables.num_glyphs()
    }

    pub fn units_per_em(&self) -> u16 {
        self.metrics.units_per_em
    }

    /// Glyph for `ch`, 0 (`.notdef`) when unmapped.
    pub fn glyph_id(&self, ch: char) -> u16 {
        self.tables.cmap.glyph_id(ch)
    }

    /// Advance width in font units; 0 for out-of-range glyphs.
    pub fn glyph_width(&self, gid: u16) -> u16 {
        self.tables.hmtx.advance(gid).unwrap_or(0)
    }

    /// The bounding box from the glyph header; `None` for empty or
    /// out-of-range glyphs.
    pub fn glyph_bbox(&self, gid: u16) -> Option<BBox> {
        self.tables.glyph(gid).and_then(glyf::glyph_bbox)
    }

    pub fn bbox(&self) -> BBox {
        self.metrics.bbox
    }

    pub fn ascent(&self) -> i16 {
        self.metrics.ascent
    }

    pub fn descent(&self) -> i16 {
        self.metrics.descent
    }

    pub fn line_gap(&self) -> i16 {
        self.metrics.line_gap
    }

    pub fn cap_height(&self) -> i16 {
        self.metrics.cap_height
    }

    pub fn x_height(&self) -> i16 {
        self.metrics.x_height
    }

    pub fn italic_angle(&self) -> f32 {
        self.metrics.italic_angle
    }

    pub fn underline_position(&self) -> i16 {
        self.metrics.underline_position
    }

    pub fn underline_thickness(&self) -> i16 {
        self.metrics.underline_thickness
    }

    pub fn is_fixed_pitch(&self) -> bool {
        self.metrics.is_fixed_pitch
    }

    pub fn weight_class(&self) -> u16 {
        self.metrics.weight_class
    }

    pub fn family_name(&self) -> Option<String> {
        self.name(NAME_ID_FAMILY)
    }

    pub fn full_name(&self) -> Option<String> {
        self.name(NAME_ID_FULL_NAME)
    }

    pub fn postscript_name(&self) -> Option<String> {
        self.name(NAME_ID_POSTSCRIPT)
    }

    fn name(&self, name_id: u16) -> Option<String> {
        self.tables.name.as_ref()?.get(name_id)
    }

    /// Advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let advance = self.glyph_width(self.glyph_id(ch));
        advance as f64 / self.metrics.units_per_em as f64 * font_size
    }

    /// Width of a string in points, with `letter_spacing` added after every
    /// character.
    pub fn measure_str(&self, text: &str, font_size: f64, letter_spacing: f64) -> f64 {
        text.chars()
            .map(|ch| self.char_width(ch, font_size) + letter_spacing)
            .sum()
    }
}

impl PartialEq for TrueTypeFont {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.data == other.data
    }
}

impl Eq for TrueTypeFont {}

impl Hash for TrueTypeFont {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash the length, the head of the file (offset table and directory) and
/// evenly spaced samples of the rest.
fn content_hash(data: &[u8]) -> u64 {
    const HEAD_BYTES: usize = 1024;
    const SAMPLES: usize = 64;
    const SAMPLE_LEN: usize = 16;

    let mut sampled = Vec::with_capacity(8 + HEAD_BYTES + SAMPLES * SAMPLE_LEN);
    sampled.extend_from_slice(&(data.len() as u64).to_be_bytes());
    sampled.extend_from_slice(&data[..data.len().min(HEAD_BYTES)]);
    if data.len() > HEAD_BYTES {
        let stride = ((data.len() - HEAD_BYTES) / SAMPLES).max(1);
        let mut pos = HEAD_BYTES;
        while pos < data.len() {
            sampled.extend_from_slice(&data[pos..(pos + SAMPLE_LEN).min(data.len())]);
            pos += stride;
        }
    }
    fnv1a(&sampled)
}
