//! Hand-assembled font fixtures for unit tests.

use std::collections::BTreeMap;

use crate::tables::cmap::Cmap;
use crate::tables::glyf::{
    Glyf, ARG_1_AND_2_ARE_WORDS, MORE_COMPONENTS, WE_HAVE_AN_X_AND_Y_SCALE, WE_HAVE_A_SCALE,
    WE_HAVE_A_TWO_BY_TWO,
};
use crate::tables::head::{Head, LocaFormat, HEAD_MAGIC};
use crate::tables::hhea::Hhea;
use crate::tables::hmtx::{HorMetric, Hmtx};
use crate::tables::loca::Loca;
use crate::tables::maxp::{Maxp, MaxpLimits, MAXP_V10};
use crate::tables::name::{windows_record, NameTable, NAME_ID_FAMILY, NAME_ID_POSTSCRIPT};
use crate::tables::os2::Os2;
use crate::tables::post::Post;
use crate::tables::TableSet;

/// A one-contour triangle; 29 bytes, so records need padding.
pub fn simple_glyph(x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Vec<u8> {
    let mut g = Vec::new();
    g.extend_from_slice(&1i16.to_be_bytes());
    for v in [x_min, y_min, x_max, y_max] {
        g.extend_from_slice(&v.to_be_bytes());
    }
    g.extend_from_slice(&2u16.to_be_bytes()); // endPtsOfContours[0]
    g.extend_from_slice(&0u16.to_be_bytes()); // instructionLength
    g.extend_from_slice(&[0x01, 0x01, 0x01]); // on-curve, word deltas
    for dx in [x_min, x_max - x_min, x_min - x_max] {
        g.extend_from_slice(&dx.to_be_bytes());
    }
    for dy in [y_min, 0, y_max - y_min] {
        g.extend_from_slice(&dy.to_be_bytes());
    }
    g
}

/// A composite glyph of `(component gid, flags)`; MORE_COMPONENTS is set
/// on all but the last component.
pub fn composite_glyph(components: &[(u16, u16)]) -> Vec<u8> {
    let mut g = Vec::new();
    g.extend_from_slice(&(-1i16).to_be_bytes());
    g.extend_from_slice(&[0u8; 8]);
    for (i, &(gid, flags)) in components.iter().enumerate() {
        let mut flags = flags & !MORE_COMPONENTS;
        if i + 1 < components.len() {
            flags |= MORE_COMPONENTS;
        }
        g.extend_from_slice(&flags.to_be_bytes());
        g.extend_from_slice(&gid.to_be_bytes());
        if flags & ARG_1_AND_2_ARE_WORDS != 0 {
            g.extend_from_slice(&[0, 10, 0, 20]);
        } else {
            g.extend_from_slice(&[5, 6]);
        }
        let one = 0x4000u16.to_be_bytes();
        if flags & WE_HAVE_A_SCALE != 0 {
            g.extend_from_slice(&one);
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            g.extend_from_slice(&one);
            g.extend_from_slice(&one);
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            g.extend_from_slice(&one);
            g.extend_from_slice(&[0, 0, 0, 0]);
            g.extend_from_slice(&one);
        }
    }
    g
}

/// Assemble a table set from glyph records, advances and a character map.
pub fn build_tables(
    glyphs: &[Vec<u8>],
    advances: &[u16],
    chars: &[(u32, u16)],
    loca_format: LocaFormat,
) -> TableSet {
    let mut glyf = Vec::new();
    let mut offsets = vec![0u32];
    for glyph in glyphs {
        glyf.extend_from_slice(glyph);
        if glyf.len() % 2 != 0 {
            glyf.push(0);
        }
        offsets.push(glyf.len() as u32);
    }

    let hmtx = Hmtx {
        metrics: advances
            .iter()
            .map(|&advance_width| HorMetric {
                advance_width,
                lsb: 10,
            })
            .collect(),
    };
    let num_glyphs = glyphs.len() as u16;
    let mappings: BTreeMap<u32, u16> = chars.iter().copied().collect();

    TableSet {
        head: Head {
            version: 0x0001_0000,
            font_revision: 0x0001_0000,
            checksum_adjustment: 0,
            magic_number: HEAD_MAGIC,
            flags: 0x0003,
            units_per_em: 1000,
            created: 0,
            modified: 0,
            x_min: 0,
            y_min: -200,
            x_max: 900,
            y_max: 800,
            mac_style: 0,
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: loca_format,
            glyph_data_format: 0,
        },
        hhea: Hhea {
            version: 0x0001_0000,
            ascender: 800,
            descender: -200,
            line_gap: 100,
            advance_width_max: advances.iter().copied().max().unwrap_or(0),
            min_left_side_bearing: 0,
            min_right_side_bearing: 0,
            x_max_extent: 900,
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            reserved: [0; 4],
            metric_data_format: 0,
            number_of_h_metrics: hmtx.compact_count(),
        },
        maxp: Maxp {
            version: MAXP_V10,
            num_glyphs,
            limits: Some(MaxpLimits {
                max_points: 3,
                max_contours: 1,
                max_component_elements: 2,
                max_component_depth: 2,
                ..Default::default()
            }),
        },
        cmap: Cmap::from_mappings(&mappings),
        hmtx,
        loca: Loca { offsets },
        glyf: Glyf { data: glyf },
        name: Some(NameTable {
            format: 0,
            records: vec![
                windows_record(NAME_ID_FAMILY, "Fixture Sans"),
                windows_record(NAME_ID_POSTSCRIPT, "FixtureSans-Regular"),
            ],
            lang_tags: Vec::new(),
        }),
        os2: Some(Os2 {
            version: 4,
            us_weight_class: 400,
            us_width_class: 5,
            s_typo_ascender: 750,
            s_typo_descender: -250,
            s_typo_line_gap: 0,
            us_win_ascent: 800,
            us_win_descent: 200,
            sx_height: 480,
            s_cap_height: 690,
            ..Default::default()
        }),
        post: Some(Post {
            version: 0x0003_0000,
            italic_angle: 0,
            underline_position: -100,
            underline_thickness: 50,
            is_fixed_pitch: 0,
            min_mem_type42: 0,
            max_mem_type42: 0,
            min_mem_type1: 0,
            max_mem_type1: 0,
            glyph_names: Vec::new(),
        }),
    }
}

/// Glyph layout of [`sample_tables`]:
///
/// ```text
/// 0 .notdef   simple
/// 1 space     empty          U+0020
/// 2 A         simple         U+0041
/// 3 B         simple         U+0042
/// 4 acute     simple
/// 5 Aacute    composite 2+4  U+00C1
/// 6 ring      simple
/// 7 Aringacute composite 5+6 U+01FA
/// 8 C         simple         U+0043
/// 9 unused    simple
/// ```
pub fn sample_tables() -> TableSet {
    let glyphs = vec![
        simple_glyph(50, 0, 450, 700),
        Vec::new(),
        simple_glyph(10, 0, 590, 700),
        simple_glyph(60, 0, 560, 700),
        simple_glyph(200, 720, 350, 850),
        composite_glyph(&[(2, 0), (4, WE_HAVE_A_SCALE)]),
        simple_glyph(220, 860, 380, 980),
        composite_glyph(&[(5, ARG_1_AND_2_ARE_WORDS), (6, 0)]),
        simple_glyph(40, -10, 600, 710),
        simple_glyph(0, 0, 100, 100),
    ];
    let advances = [500, 250, 600, 600, 300, 600, 300, 600, 650, 650];
    let chars = [(0x20, 1), (0x41, 2), (0x42, 3), (0x43, 8), (0xC1, 5), (0x1FA, 7)];
    build_tables(&glyphs, &advances, &chars, LocaFormat::Short)
}

pub fn sample_font_bytes() -> Vec<u8> {
    sample_tables().to_bytes()
}
