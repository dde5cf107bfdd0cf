//! Shared fixtures: small TrueType fonts assembled through the public
//! table API.

#![allow(dead_code)]

use std::collections::BTreeMap;

use truetype_subset::tables::cmap::Cmap;
use truetype_subset::tables::glyf::{Glyf, ARG_1_AND_2_ARE_WORDS, MORE_COMPONENTS, WE_HAVE_A_SCALE};
use truetype_subset::tables::head::{Head, LocaFormat, HEAD_MAGIC};
use truetype_subset::tables::hhea::Hhea;
use truetype_subset::tables::hmtx::{HorMetric, Hmtx};
use truetype_subset::tables::loca::Loca;
use truetype_subset::tables::maxp::{Maxp, MaxpLimits, MAXP_V10};
use truetype_subset::tables::name::{windows_record, NameTable, NAME_ID_FAMILY};
use truetype_subset::tables::os2::Os2;
use truetype_subset::tables::post::Post;
use truetype_subset::tables::TableSet;

/// A square outline: one contour, four on-curve points.
pub fn square(x_min: i16, y_min: i16, size: i16) -> Vec<u8> {
    let mut g = Vec::new();
    g.extend_from_slice(&1i16.to_be_bytes());
    for v in [x_min, y_min, x_min + size, y_min + size] {
        g.extend_from_slice(&v.to_be_bytes());
    }
    g.extend_from_slice(&3u16.to_be_bytes());
    g.extend_from_slice(&0u16.to_be_bytes());
    g.extend_from_slice(&[0x01; 4]);
    for dx in [x_min, size, 0, -size] {
        g.extend_from_slice(&dx.to_be_bytes());
    }
    for dy in [y_min, 0, size, 0] {
        g.extend_from_slice(&dy.to_be_bytes());
    }
    g
}

/// A composite placing each component at an (x, y) offset.
pub fn composite(components: &[(u16, i16, i16)]) -> Vec<u8> {
    const ARGS_ARE_XY_VALUES: u16 = 0x0002;

    let mut g = Vec::new();
    g.extend_from_slice(&(-1i16).to_be_bytes());
    g.extend_from_slice(&[0u8; 8]);
    for (i, &(gid, dx, dy)) in components.iter().enumerate() {
        let mut flags = ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES;
        if i == 0 {
            flags |= WE_HAVE_A_SCALE;
        }
        if i + 1 < components.len() {
            flags |= MORE_COMPONENTS;
        }
        g.extend_from_slice(&flags.to_be_bytes());
        g.extend_from_slice(&gid.to_be_bytes());
        g.extend_from_slice(&dx.to_be_bytes());
        g.extend_from_slice(&dy.to_be_bytes());
        if i == 0 {
            g.extend_from_slice(&0x4000u16.to_be_bytes());
        }
    }
    g
}

pub struct FontBuilder {
    glyphs: Vec<Vec<u8>>,
    advances: Vec<u16>,
    chars: BTreeMap<u32, u16>,
    loca_format: LocaFormat,
    with_metadata: bool,
}

impl FontBuilder {
    pub fn new() -> Self {
        FontBuilder {
            glyphs: vec![square(50, 0, 400)],
            advances: vec![500],
            chars: BTreeMap::new(),
            loca_format: LocaFormat::Short,
            with_metadata: true,
        }
    }

    /// Append a glyph and return its ID.
    pub fn glyph(&mut self, record: Vec<u8>, advance: u16) -> u16 {
        self.glyphs.push(record);
        self.advances.push(advance);
        (self.glyphs.len() - 1) as u16
    }

    pub fn map(&mut self, ch: char, gid: u16) -> &mut Self {
        self.chars.insert(ch as u32, gid);
        self
    }

    pub fn loca_format(&mut self, format: LocaFormat) -> &mut Self {
        self.loca_format = format;
        self
    }

    pub fn without_metadata(&mut self) -> &mut Self {
        self.with_metadata = false;
        self
    }

    pub fn tables(&self) -> TableSet {
        let mut glyf = Vec::new();
        let mut offsets = vec![0u32];
        for glyph in &self.glyphs {
            glyf.extend_from_slice(glyph);
            if glyf.len() % 2 != 0 {
                glyf.push(0);
            }
            offsets.push(glyf.len() as u32);
        }
        let hmtx = Hmtx {
            metrics: self
                .advances
                .iter()
                .map(|&advance_width| HorMetric {
                    advance_width,
                    lsb: 50,
                })
                .collect(),
        };

        TableSet {
            head: Head {
                version: 0x0001_0000,
                font_revision: 0x0001_0000,
                checksum_adjustment: 0,
                magic_number: HEAD_MAGIC,
                flags: 0x000B,
                units_per_em: 1000,
                created: 3_600_000_000,
                modified: 3_600_000_000,
                x_min: -50,
                y_min: -250,
                x_max: 1100,
                y_max: 950,
                mac_style: 0,
                lowest_rec_ppem: 9,
                font_direction_hint: 2,
                index_to_loc_format: self.loca_format,
                glyph_data_format: 0,
            },
            hhea: Hhea {
                version: 0x0001_0000,
                ascender: 900,
                descender: -250,
                line_gap: 50,
                advance_width_max: self.advances.iter().copied().max().unwrap_or(0),
                min_left_side_bearing: 0,
                min_right_side_bearing: 0,
                x_max_extent: 1100,
                caret_slope_rise: 1,
                caret_slope_run: 0,
                caret_offset: 0,
                reserved: [0; 4],
                metric_data_format: 0,
                number_of_h_metrics: hmtx.compact_count(),
            },
            maxp: Maxp {
                version: MAXP_V10,
                num_glyphs: self.glyphs.len() as u16,
                limits: Some(MaxpLimits {
                    max_points: 4,
                    max_contours: 1,
                    max_component_elements: 3,
                    max_component_depth: 3,
                    ..Default::default()
                }),
            },
            cmap: Cmap::from_mappings(&self.chars),
            hmtx,
            loca: Loca { offsets },
            glyf: Glyf { data: glyf },
            name: self.with_metadata.then(|| NameTable {
                format: 0,
                records: vec![windows_record(NAME_ID_FAMILY, "Builder Serif")],
                lang_tags: Vec::new(),
            }),
            os2: self.with_metadata.then(|| Os2 {
                version: 3,
                us_weight_class: 700,
                us_width_class: 5,
                s_typo_ascender: 880,
                s_typo_descender: -220,
                s_typo_line_gap: 80,
                us_win_ascent: 950,
                us_win_descent: 250,
                sx_height: 520,
                s_cap_height: 710,
                ..Default::default()
            }),
            post: self.with_metadata.then(|| Post {
                version: 0x0003_0000,
                italic_angle: -12 * 65536,
                underline_position: -120,
                underline_thickness: 60,
                is_fixed_pitch: 0,
                min_mem_type42: 0,
                max_mem_type42: 0,
                min_mem_type1: 0,
                max_mem_type1: 0,
                glyph_names: Vec::new(),
            }),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        self.tables().to_bytes()
    }
}

/// The Latin font most tests use:
///
/// ```text
/// 1..=26   A..Z, simple, advances 600 + 10·i
/// 27       space, empty
/// 28       acute, simple
/// 29       ring, simple
/// 30       Á = A + acute
/// 31       Ǻ = Á + ring (nested)
/// 32..=39  unmapped simple glyphs
/// 40       😀 (U+1F600), simple
/// ```
pub fn latin_font() -> Vec<u8> {
    latin_builder().build()
}

pub fn latin_builder() -> FontBuilder {
    let mut b = FontBuilder::new();
    for (i, ch) in ('A'..='Z').enumerate() {
        let gid = b.glyph(square(40, 0, 500 + i as i16), 600 + 10 * i as u16);
        b.map(ch, gid);
    }
    let space = b.glyph(Vec::new(), 250);
    b.map(' ', space);
    let acute = b.glyph(square(200, 720, 120), 300);
    let ring = b.glyph(square(220, 860, 140), 300);
    let a_acute = b.glyph(composite(&[(1, 0, 0), (acute, 100, 0)]), 600);
    b.map('\u{C1}', a_acute);
    let a_ring_acute = b.glyph(composite(&[(a_acute, 0, 0), (ring, 80, 40)]), 600);
    b.map('\u{1FA}', a_ring_acute);
    for i in 0..8 {
        b.glyph(square(0, 0, 100 + i), 700);
    }
    let emoji = b.glyph(square(0, -100, 900), 1000);
    b.map('\u{1F600}', emoji);
    b
}

/// A font whose only mapped character is 'A' at glyph 5.
pub fn a_at_five() -> Vec<u8> {
    let mut b = FontBuilder::new();
    for i in 1..=6 {
        b.glyph(square(0, 0, 100 * i), 500 + i as u16);
    }
    b.map('A', 5);
    b.build()
}
