//! # Table Regenerator
//!
//! Builds the subset's table set from the original tables and a
//! [`GlyphRemap`]. Tables are rebuilt in dependency order: `hmtx` before
//! `hhea` (which records its explicit-metrics count), `glyf` before `loca`
//! and `head` (whose loca format may depend on the new glyf size).

use std::collections::BTreeMap;

use crate::error::Result;
use crate::options::SubsetOptions;
use crate::parse::pad4;
use crate::tables::cmap::Cmap;
use crate::tables::glyf::{remap_components, Glyf};
use crate::tables::head::LocaFormat;
use crate::tables::hmtx::{HorMetric, Hmtx};
use crate::tables::loca::Loca;
use crate::tables::TableSet;

use super::resolve::GlyphRemap;

/// Produce the table set for `remap`, sized to its glyph count.
pub fn regenerate(
    tables: &TableSet,
    remap: &GlyphRemap,
    options: &SubsetOptions,
) -> Result<TableSet> {
    let hmtx = regenerate_hmtx(tables, remap);

    let mut hhea = tables.hhea.clone();
    hhea.number_of_h_metrics = hmtx.compact_count();

    let mut maxp = tables.maxp.clone();
    maxp.num_glyphs = remap.total_glyphs();

    let mappings: BTreeMap<u32, u16> = remap
        .char_to_new_map()
        .iter()
        .map(|(&ch, &gid)| (ch as u32, gid))
        .collect();
    let cmap = Cmap::from_mappings(&mappings);

    let (glyf, loca) = regenerate_glyf(tables, remap)?;

    let mut head = tables.head.clone();
    head.checksum_adjustment = 0;
    head.index_to_loc_format = choose_loca_format(head.index_to_loc_format, &loca, options);

    let (name, os2) = if options.retain_name_tables {
        (tables.name.clone(), tables.os2.clone())
    } else {
        (None, None)
    };

    Ok(TableSet {
        head,
        hhea,
        maxp,
        cmap,
        hmtx,
        loca,
        glyf,
        name,
        os2,
        post: tables.post.clone(),
    })
}

fn regenerate_hmtx(tables: &TableSet, remap: &GlyphRemap) -> Hmtx {
    let metrics = remap
        .old_gids()
        .iter()
        .map(|&old_gid| {
            tables.hmtx.get(old_gid).unwrap_or(HorMetric {
                advance_width: 0,
                lsb: 0,
            })
        })
        .collect();
    Hmtx { metrics }
}

/// Copy each retained glyph record in new-ID order, rewriting composite
/// component IDs, with every record padded to 4 bytes.
fn regenerate_glyf(tables: &TableSet, remap: &GlyphRemap) -> Result<(Glyf, Loca)> {
    let mut data = Vec::new();
    let mut offsets = Vec::with_capacity(remap.old_gids().len() + 1);

    for &old_gid in remap.old_gids() {
        offsets.push(data.len() as u32);
        let Some(record) = tables.glyph(old_gid) else {
            continue;
        };
        if record.is_empty() {
            continue;
        }

        let mut record = record.to_vec();
        remap_components(&mut record, |gid| remap.old_to_new(gid))?;
        data.extend_from_slice(&record);
        pad4(&mut data);
    }
    offsets.push(data.len() as u32);

    Ok((Glyf { data }, Loca { offsets }))
}

fn choose_loca_format(original: LocaFormat, loca: &Loca, options: &SubsetOptions) -> LocaFormat {
    let fits_short = loca.fits_short();
    if options.optimize_loca_format {
        return if fits_short {
            LocaFormat::Short
        } else {
            LocaFormat::Long
        };
    }
    if original == LocaFormat::Short && !fits_short {
        log::debug!(
            "subset glyf is {} bytes, too large for short loca; switching to long",
            loca.glyf_len()
        );
        return LocaFormat::Long;
    }
    original
}
