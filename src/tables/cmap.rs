//! # Character Map
//!
//! Parses the `cmap` table and maps character codes to glyph IDs.
//!
//! A `cmap` lists many encoding records; one is selected at parse time:
//! Windows Unicode BMP (3,1) or any Unicode-platform record wins outright,
//! Windows Symbol (3,0) is kept only as a fallback. Only the selected
//! subtable is decoded, so records in formats we don't read (e.g. 14) are
//! harmless as long as they aren't chosen.
//!
//! Supported subtable formats:
//!
//! - **0**: 256-entry byte array
//! - **4**: segmented BMP ranges with deltas or a glyph-ID array
//! - **6**: trimmed dense table
//! - **12**: segmented coverage over all of Unicode
//!
//! [`Cmap::from_mappings`] builds a fresh table for subset fonts.

use std::collections::BTreeMap;

use crate::error::{FontError, Result};
use crate::parse::Reader;
use crate::sfnt::SearchRange;
use crate::tag::Tag;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_WINDOWS: u16 = 3;
const ENCODING_SYMBOL: u16 = 0;
const ENCODING_UNICODE_BMP: u16 = 1;
/// Unicode platform, full repertoire.
const ENCODING_UNICODE_FULL: u16 = 4;
/// Unicode platform, variation sequences (format 14): not a character map.
const ENCODING_UNICODE_VARIATIONS: u16 = 5;
/// Windows platform, full Unicode repertoire.
const ENCODING_WINDOWS_FULL: u16 = 10;

/// Format 4 declares its length in a u16.
const FORMAT4_MAX_LEN: usize = 0xFFFF;

/// Symbol fonts conventionally place their glyphs in the private use area.
const SYMBOL_PUA_BASE: u32 = 0xF000;

/// A (start, end, startGlyph) run of a format 12 subtable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequentialGroup {
    pub start_char: u32,
    pub end_char: u32,
    pub start_glyph: u32,
}

/// Format 4's parallel segment arrays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format4 {
    pub language: u16,
    pub end_codes: Vec<u16>,
    pub start_codes: Vec<u16>,
    pub id_deltas: Vec<i16>,
    pub id_range_offsets: Vec<u16>,
    pub glyph_ids: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmapSubtable {
    Format0 { language: u16, glyph_ids: Vec<u8> },
    Format4(Format4),
    Format6 { language: u16, first_code: u16, glyph_ids: Vec<u16> },
    Format12 { language: u32, groups: Vec<SequentialGroup> },
}

/// One encoding record with its decoded subtable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmapRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub subtable: CmapSubtable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmap {
    pub records: Vec<CmapRecord>,
    /// Index into `records` used for lookups.
    selected: usize,
}

// ─── Parsing ────────────────────────────────────────────────────

impl Cmap {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data, Tag::CMAP);
        let _version = r.read_u16()?;
        let num_tables = r.read_u16()?;

        let mut preferred = None;
        let mut fallback = None;
        for _ in 0..num_tables {
            let platform_id = r.read_u16()?;
            let encoding_id = r.read_u16()?;
            let offset = r.read_u32()?;
            let key = (platform_id, encoding_id, offset);

            let is_unicode = (platform_id == PLATFORM_WINDOWS
                && encoding_id == ENCODING_UNICODE_BMP)
                || (platform_id == PLATFORM_UNICODE && encoding_id != ENCODING_UNICODE_VARIATIONS);
            if is_unicode {
                preferred = Some(key);
                break;
            }
            if platform_id == PLATFORM_WINDOWS
                && encoding_id == ENCODING_SYMBOL
                && fallback.is_none()
            {
                fallback = Some(key);
            }
        }

        let (platform_id, encoding_id, offset) =
            preferred.or(fallback).ok_or(FontError::NoSuitableCmap)?;
        let subtable = CmapSubtable::parse(data, offset as usize)?;
        log::debug!(
            "cmap: selected ({platform_id},{encoding_id}) format {}",
            subtable.format()
        );

        Ok(Cmap {
            records: vec![CmapRecord {
                platform_id,
                encoding_id,
                subtable,
            }],
            selected: 0,
        })
    }

    pub fn selected(&self) -> &CmapRecord {
        &self.records[self.selected]
    }

    pub fn is_symbol(&self) -> bool {
        let record = self.selected();
        record.platform_id == PLATFORM_WINDOWS && record.encoding_id == ENCODING_SYMBOL
    }

    /// Glyph ID for `code`; 0 when unmapped.
    pub fn lookup(&self, code: u32) -> u16 {
        let subtable = &self.selected().subtable;
        let gid = subtable.lookup(code);
        if gid == 0 && self.is_symbol() && code < 0x100 {
            return subtable.lookup(SYMBOL_PUA_BASE + code);
        }
        gid
    }

    pub fn glyph_id(&self, ch: char) -> u16 {
        self.lookup(ch as u32)
    }

    /// Every mapped (code, glyph) pair of the selected subtable, ascending.
    pub fn mappings(&self) -> Box<dyn Iterator<Item = (u32, u16)> + '_> {
        self.selected().subtable.mappings()
    }
}

impl CmapSubtable {
    fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let mut r = Reader::at(data, offset, Tag::CMAP)?;
        let format = r.read_u16()?;
        match format {
            0 => {
                let _length = r.read_u16()?;
                let language = r.read_u16()?;
                let glyph_ids = r.read_bytes(256)?.to_vec();
                Ok(CmapSubtable::Format0 {
                    language,
                    glyph_ids,
                })
            }
            4 => Self::parse_format4(data, offset, r),
            6 => {
                let _length = r.read_u16()?;
                let language = r.read_u16()?;
                let first_code = r.read_u16()?;
                let entry_count = r.read_u16()?;
                let glyph_ids = (0..entry_count)
                    .map(|_| r.read_u16())
                    .collect::<Result<Vec<_>>>()?;
                Ok(CmapSubtable::Format6 {
                    language,
                    first_code,
                    glyph_ids,
                })
            }
            12 => {
                let _reserved = r.read_u16()?;
                let _length = r.read_u32()?;
                let language = r.read_u32()?;
                let num_groups = r.read_u32()?;
                if num_groups as usize > r.remaining() / 12 {
                    return Err(FontError::Truncated {
                        tag: Tag::CMAP,
                        needed: r.pos() + num_groups as usize * 12,
                        available: data.len(),
                    });
                }
                let mut groups = Vec::with_capacity(num_groups as usize);
                for _ in 0..num_groups {
                    let group = SequentialGroup {
                        start_char: r.read_u32()?,
                        end_char: r.read_u32()?,
                        start_glyph: r.read_u32()?,
                    };
                    if group.start_char > group.end_char {
                        return Err(FontError::malformed(
                            Tag::CMAP,
                            format!(
                                "format 12 group starts at {:#X} after its end {:#X}",
                                group.start_char, group.end_char
                            ),
                        ));
                    }
                    groups.push(group);
                }
                Ok(CmapSubtable::Format12 { language, groups })
            }
            other => Err(FontError::UnsupportedCmapFormat(other)),
        }
    }

    fn parse_format4(data: &[u8], offset: usize, mut r: Reader<'_>) -> Result<Self> {
        let length = r.read_u16()? as usize;
        let language = r.read_u16()?;
        let seg_count = (r.read_u16()? / 2) as usize;
        // searchRange, entrySelector, rangeShift
        r.skip(6)?;

        let read_u16s = |r: &mut Reader<'_>| -> Result<Vec<u16>> {
            (0..seg_count).map(|_| r.read_u16()).collect()
        };
        let end_codes = read_u16s(&mut r)?;
        let _reserved_pad = r.read_u16()?;
        let start_codes = read_u16s(&mut r)?;
        let id_deltas = read_u16s(&mut r)?.into_iter().map(|d| d as i16).collect();
        let id_range_offsets = read_u16s(&mut r)?;

        // Some fonts declare a length past the end of the table; trust the data.
        let end = (offset + length).min(data.len());
        let glyph_count = end.saturating_sub(r.pos()) / 2;
        let glyph_ids = (0..glyph_count)
            .map(|_| r.read_u16())
            .collect::<Result<Vec<_>>>()?;

        Ok(CmapSubtable::Format4(Format4 {
            language,
            end_codes,
            start_codes,
            id_deltas,
            id_range_offsets,
            glyph_ids,
        }))
    }

    pub fn format(&self) -> u16 {
        match self {
            CmapSubtable::Format0 { .. } => 0,
            CmapSubtable::Format4(_) => 4,
            CmapSubtable::Format6 { .. } => 6,
            CmapSubtable::Format12 { .. } => 12,
        }
    }

    pub fn lookup(&self, code: u32) -> u16 {
        match self {
            CmapSubtable::Format0 { glyph_ids, .. } => glyph_ids
                .get(code as usize)
                .map(|&g| g as u16)
                .unwrap_or(0),
            CmapSubtable::Format4(f) => f.lookup(code),
            CmapSubtable::Format6 {
                first_code,
                glyph_ids,
                ..
            } => code
                .checked_sub(*first_code as u32)
                .and_then(|i| glyph_ids.get(i as usize))
                .copied()
                .unwrap_or(0),
            CmapSubtable::Format12 { groups, .. } => {
                let idx = groups.partition_point(|g| g.end_char < code);
                match groups.get(idx) {
                    Some(g) if g.start_char <= code => {
                        let gid = g.start_glyph as u64 + (code - g.start_char) as u64;
                        u16::try_from(gid).unwrap_or(0)
                    }
                    _ => 0,
                }
            }
        }
    }

    pub fn mappings(&self) -> Box<dyn Iterator<Item = (u32, u16)> + '_> {
        match self {
            CmapSubtable::Format0 { glyph_ids, .. } => Box::new(
                glyph_ids
                    .iter()
                    .enumerate()
                    .filter(|&(_, &g)| g != 0)
                    .map(|(c, &g)| (c as u32, g as u16)),
            ),
            CmapSubtable::Format4(f) => Box::new(f.mappings()),
            CmapSubtable::Format6 {
                first_code,
                glyph_ids,
                ..
            } => Box::new(
                glyph_ids
                    .iter()
                    .enumerate()
                    .filter(|&(_, &g)| g != 0)
                    .map(move |(i, &g)| (*first_code as u32 + i as u32, g)),
            ),
            CmapSubtable::Format12 { groups, .. } => Box::new(groups.iter().flat_map(|g| {
                (g.start_char..=g.end_char).filter_map(move |c| {
                    let gid = g.start_glyph as u64 + (c - g.start_char) as u64;
                    u16::try_from(gid).ok().filter(|&gid| gid != 0).map(|gid| (c, gid))
                })
            })),
        }
    }
}

impl Format4 {
    /// Serialized size in bytes.
    pub fn byte_len(&self) -> usize {
        16 + self.end_codes.len() * 8 + self.glyph_ids.len() * 2
    }

    /// Glyph for `code` within segment `i`, which must contain it.
    fn lookup_in_segment(&self, i: usize, code: u32) -> u16 {
        let start = self.start_codes[i] as u32;
        let delta = self.id_deltas[i] as i32;
        let range_offset = self.id_range_offsets[i] as usize;

        if range_offset == 0 {
            return (code as i32 + delta) as u16;
        }

        // idRangeOffset is relative to its own slot in the idRangeOffset
        // array, which glyphIdArray immediately follows.
        let seg_count = self.end_codes.len();
        let index = (range_offset / 2 + (code - start) as usize + i).checked_sub(seg_count);
        match index.and_then(|idx| self.glyph_ids.get(idx)) {
            Some(&0) | None => 0,
            Some(&glyph) => (glyph as i32 + delta) as u16,
        }
    }

    pub fn lookup(&self, code: u32) -> u16 {
        if code >= 0xFFFF {
            return 0;
        }
        let i = self.end_codes.partition_point(|&end| (end as u32) < code);
        if i >= self.end_codes.len() || (self.start_codes[i] as u32) > code {
            return 0;
        }
        self.lookup_in_segment(i, code)
    }

    pub fn mappings(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        (0..self.end_codes.len()).flat_map(move |i| {
            let start = self.start_codes[i] as u32;
            let end = (self.end_codes[i] as u32).min(0xFFFE);
            (start..=end).filter_map(move |code| {
                let gid = self.lookup_in_segment(i, code);
                (gid != 0).then_some((code, gid))
            })
        })
    }
}

// ─── Building ───────────────────────────────────────────────────

impl Cmap {
    /// Build a table from a code → glyph map.
    ///
    /// Emits a (3,1) format 4 subtable for the BMP. If any code lies beyond
    /// it, a (0,4) format 12 subtable covering everything is added ahead of
    /// it so that it is the one selected on parse.
    ///
    /// When the BMP mappings are too scattered for format 4's 16-bit length,
    /// the format 4 subtable is replaced by a (3,10) format 12 one and the
    /// (0,4) record is always present.
    pub fn from_mappings(mappings: &BTreeMap<u32, u16>) -> Self {
        let mut records = Vec::with_capacity(2);
        let bmp = build_format4(mappings);
        let bmp_fits = bmp.byte_len() <= FORMAT4_MAX_LEN;
        if !bmp_fits {
            log::debug!(
                "cmap: format 4 would need {} bytes; using format 12 only",
                bmp.byte_len()
            );
        }

        let needs_full = !bmp_fits || mappings.keys().any(|&code| code > 0xFFFF);
        if needs_full {
            records.push(CmapRecord {
                platform_id: PLATFORM_UNICODE,
                encoding_id: ENCODING_UNICODE_FULL,
                subtable: build_format12(mappings),
            });
        }
        records.push(if bmp_fits {
            CmapRecord {
                platform_id: PLATFORM_WINDOWS,
                encoding_id: ENCODING_UNICODE_BMP,
                subtable: CmapSubtable::Format4(bmp),
            }
        } else {
            CmapRecord {
                platform_id: PLATFORM_WINDOWS,
                encoding_id: ENCODING_WINDOWS_FULL,
                subtable: build_format12(mappings),
            }
        });
        Cmap {
            records,
            selected: 0,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let subtables: Vec<Vec<u8>> = self.records.iter().map(|r| r.subtable.to_bytes()).collect();

        let mut data: Vec<u8> = Vec::new();
        data.extend_from_slice(&0u16.to_be_bytes()); // version
        data.extend_from_slice(&(self.records.len() as u16).to_be_bytes());

        let mut offset = 4 + self.records.len() * 8;
        for (record, subtable) in self.records.iter().zip(&subtables) {
            data.extend_from_slice(&record.platform_id.to_be_bytes());
            data.extend_from_slice(&record.encoding_id.to_be_bytes());
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            offset += subtable.len();
        }
        for subtable in subtables {
            data.extend_from_slice(&subtable);
        }
        data
    }
}

/// Runs where both code and glyph advance by one collapse into a single
/// segment addressed purely by idDelta.
fn build_format4(mappings: &BTreeMap<u32, u16>) -> Format4 {
    let mut start_codes: Vec<u16> = Vec::new();
    let mut end_codes: Vec<u16> = Vec::new();
    let mut id_deltas: Vec<i16> = Vec::new();
    let mut prev: Option<(u32, u16)> = None;

    for (&code, &gid) in mappings.range(..0xFFFF) {
        if gid == 0 {
            continue;
        }
        let continues_run =
            matches!(prev, Some((pc, pg)) if pc + 1 == code && pg.wrapping_add(1) == gid);
        if continues_run {
            if let Some(last) = end_codes.last_mut() {
                *last = code as u16;
            }
        } else {
            start_codes.push(code as u16);
            end_codes.push(code as u16);
            id_deltas.push((gid as i32 - code as i32).rem_euclid(0x10000) as u16 as i16);
        }
        prev = Some((code, gid));
    }

    // Closing segment.
    start_codes.push(0xFFFF);
    end_codes.push(0xFFFF);
    id_deltas.push(1);

    let seg_count = start_codes.len();
    Format4 {
        language: 0,
        end_codes,
        start_codes,
        id_deltas,
        id_range_offsets: vec![0; seg_count],
        glyph_ids: Vec::new(),
    }
}

fn build_format12(mappings: &BTreeMap<u32, u16>) -> CmapSubtable {
    let mut groups: Vec<SequentialGroup> = Vec::new();
    for (&code, &gid) in mappings {
        if gid == 0 {
            continue;
        }
        if let Some(last) = groups.last_mut() {
            let next_gid = last.start_glyph + (last.end_char - last.start_char) + 1;
            if last.end_char + 1 == code && next_gid == gid as u32 {
                last.end_char = code;
                continue;
            }
        }
        groups.push(SequentialGroup {
            start_char: code,
            end_char: code,
            start_glyph: gid as u32,
        });
    }
    CmapSubtable::Format12 {
        language: 0,
        groups,
    }
}

// ─── Serialization ──────────────────────────────────────────────

impl CmapSubtable {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data: Vec<u8> = Vec::new();
        match self {
            CmapSubtable::Format0 {
                language,
                glyph_ids,
            } => {
                data.extend_from_slice(&0u16.to_be_bytes());
                data.extend_from_slice(&262u16.to_be_bytes());
                data.extend_from_slice(&language.to_be_bytes());
                let mut ids = glyph_ids.clone();
                ids.resize(256, 0);
                data.extend_from_slice(&ids);
            }
            CmapSubtable::Format4(f) => {
                let seg_count = f.end_codes.len();
                let computed = SearchRange::compute(seg_count, 2);

                data.extend_from_slice(&4u16.to_be_bytes());
                data.extend_from_slice(&(f.byte_len().min(FORMAT4_MAX_LEN) as u16).to_be_bytes());
                data.extend_from_slice(&f.language.to_be_bytes());
                data.extend_from_slice(&((seg_count * 2) as u16).to_be_bytes());
                data.extend_from_slice(&computed.search_range.to_be_bytes());
                data.extend_from_slice(&computed.entry_selector.to_be_bytes());
                data.extend_from_slice(&computed.range_shift.to_be_bytes());
                for &ec in &f.end_codes {
                    data.extend_from_slice(&ec.to_be_bytes());
                }
                data.extend_from_slice(&0u16.to_be_bytes()); // reservedPad
                for &sc in &f.start_codes {
                    data.extend_from_slice(&sc.to_be_bytes());
                }
                for &d in &f.id_deltas {
                    data.extend_from_slice(&d.to_be_bytes());
                }
                for &r in &f.id_range_offsets {
                    data.extend_from_slice(&r.to_be_bytes());
                }
                for &g in &f.glyph_ids {
                    data.extend_from_slice(&g.to_be_bytes());
                }
            }
            CmapSubtable::Format6 {
                language,
                first_code,
                glyph_ids,
            } => {
                data.extend_from_slice(&6u16.to_be_bytes());
                data.extend_from_slice(&((10 + glyph_ids.len() * 2) as u16).to_be_bytes());
                data.extend_from_slice(&language.to_be_bytes());
                data.extend_from_slice(&first_code.to_be_bytes());
                data.extend_from_slice(&(glyph_ids.len() as u16).to_be_bytes());
                for &g in glyph_ids {
                    data.extend_from_slice(&g.to_be_bytes());
                }
            }
            CmapSubtable::Format12 { language, groups } => {
                data.extend_from_slice(&12u16.to_be_bytes());
                data.extend_from_slice(&0u16.to_be_bytes()); // reserved
                data.extend_from_slice(&((16 + groups.len() * 12) as u32).to_be_bytes());
                data.extend_from_slice(&language.to_be_bytes());
                data.extend_from_slice(&(groups.len() as u32).to_be_bytes());
                for g in groups {
                    data.extend_from_slice(&g.start_char.to_be_bytes());
                    data.extend_from_slice(&g.end_char.to_be_bytes());
                    data.extend_from_slice(&g.start_glyph.to_be_bytes());
                }
            }
        }
        data
    }
}
