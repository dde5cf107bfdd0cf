//! # sfnt Container
//!
//! Reading the offset table and table directory of a TrueType file, and
//! writing an arbitrary set of tables back out as a byte-exact, checksummed
//! container.
//!
//! Layout of the container:
//!
//! ```text
//! offset table   12 bytes   scalar, numTables, searchRange, entrySelector, rangeShift
//! directory      16 × n     tag, checksum, offset, length (sorted by tag)
//! table data                each table zero-padded to a 4-byte boundary
//! ```

use std::collections::HashMap;

use crate::error::{FontError, Result};
use crate::parse::{pad4, read_u32, write_u32, Reader};
use crate::tag::Tag;

/// TrueType 1.0 scalar.
pub const TRUETYPE_SCALAR: u32 = 0x0001_0000;
/// Apple's `true` scalar.
pub const APPLE_TRUE_SCALAR: u32 = 0x7472_7565;
/// `OTTO`: CFF outlines.
pub const CFF_SCALAR: u32 = 0x4F54_544F;

/// Target value for the whole-file checksum.
pub const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

const OFFSET_TABLE_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;
/// Offset of `checksumAdjustment` within `head`.
const HEAD_ADJUSTMENT_OFFSET: usize = 8;

/// One entry of the table directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.length as usize
    }
}

/// The parsed offset table and directory of a font file.
#[derive(Debug, Clone)]
pub struct TableDirectory {
    pub scalar: u32,
    records: Vec<TableRecord>,
    index: HashMap<Tag, usize>,
}

impl TableDirectory {
    /// Parse and validate the directory of `data`.
    ///
    /// Every record's range must lie within `data`; the first record wins
    /// if a tag is repeated.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data, Tag::SFNT);
        let scalar = r.read_u32()?;
        match scalar {
            TRUETYPE_SCALAR | APPLE_TRUE_SCALAR => {}
            CFF_SCALAR => return Err(FontError::UnsupportedOutlines),
            _ => return Err(FontError::NotAFont { scalar }),
        }

        let num_tables = r.read_u16()? as usize;
        // searchRange, entrySelector, rangeShift are recomputed on write.
        r.skip(6)?;

        let mut records = Vec::with_capacity(num_tables);
        let mut index = HashMap::with_capacity(num_tables);
        for _ in 0..num_tables {
            let record = TableRecord {
                tag: r.read_tag()?,
                checksum: r.read_u32()?,
                offset: r.read_u32()?,
                length: r.read_u32()?,
            };
            let end = record.offset as u64 + record.length as u64;
            if end > data.len() as u64 {
                return Err(FontError::Truncated {
                    tag: record.tag,
                    needed: end as usize,
                    available: data.len(),
                });
            }
            index.entry(record.tag).or_insert(records.len());
            records.push(record);
        }

        Ok(Self {
            scalar,
            records,
            index,
        })
    }

    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    pub fn get(&self, tag: Tag) -> Option<&TableRecord> {
        self.index.get(&tag).map(|&i| &self.records[i])
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.index.contains_key(&tag)
    }

    /// The bytes of table `tag` within the file the directory was parsed from.
    pub fn table_data<'a>(&self, data: &'a [u8], tag: Tag) -> Option<&'a [u8]> {
        self.get(tag).and_then(|record| data.get(record.range()))
    }

    /// Tags whose stored checksum doesn't match their contents.
    ///
    /// `head` is summed with its `checksumAdjustment` treated as zero.
    pub fn checksum_mismatches(&self, data: &[u8]) -> Vec<Tag> {
        let mut mismatched = Vec::new();
        for record in &self.records {
            let Some(bytes) = data.get(record.range()) else {
                continue;
            };
            let mut sum = checksum(bytes);
            if record.tag == Tag::HEAD && bytes.len() >= HEAD_ADJUSTMENT_OFFSET + 4 {
                sum = sum.wrapping_sub(read_u32(bytes, HEAD_ADJUSTMENT_OFFSET));
            }
            if sum != record.checksum {
                mismatched.push(record.tag);
            }
        }
        mismatched
    }
}

/// Binary search hints stored in the offset table (and in cmap format 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    /// Hints for `count` items of `item_size` bytes each.
    pub fn compute(count: usize, item_size: usize) -> Self {
        if count == 0 {
            return Self {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = (usize::BITS - 1 - count.leading_zeros()) as usize;
        let search_range = (1usize << entry_selector) * item_size;
        let range_shift = count * item_size - search_range;
        Self {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// The 32-bit big-endian word sum of `data`, modulo 2^32.
///
/// A trailing partial word is zero-padded.
pub fn checksum(data: &[u8]) -> u32 {
    let mut chunks = data.chunks_exact(4);
    let mut sum = chunks
        .by_ref()
        .fold(0u32, |sum, word| sum.wrapping_add(read_u32(word, 0)));
    let rest = chunks.remainder();
    if !rest.is_empty() {
        let mut last = [0u8; 4];
        last[..rest.len()].copy_from_slice(rest);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

/// Serialize a set of tables into a TrueType file.
///
/// Tables are written in ascending tag order. If a `head` table is present,
/// its `checksumAdjustment` is zeroed for the directory checksum and then
/// set so the whole file sums to [`CHECKSUM_MAGIC`].
pub fn write_font(mut tables: Vec<(Tag, Vec<u8>)>) -> Vec<u8> {
    tables.sort_by_key(|(tag, _)| *tag);
    tables.dedup_by_key(|(tag, _)| *tag);

    let num_tables = tables.len();
    let computed = SearchRange::compute(num_tables, TABLE_RECORD_LEN);

    let mut output: Vec<u8> = Vec::new();
    output.extend_from_slice(&TRUETYPE_SCALAR.to_be_bytes());
    output.extend_from_slice(&(num_tables as u16).to_be_bytes());
    output.extend_from_slice(&computed.search_range.to_be_bytes());
    output.extend_from_slice(&computed.entry_selector.to_be_bytes());
    output.extend_from_slice(&computed.range_shift.to_be_bytes());

    let mut table_offset = OFFSET_TABLE_LEN + num_tables * TABLE_RECORD_LEN;
    let mut head_offset = None;

    for (tag, data) in tables.iter_mut() {
        if *tag == Tag::HEAD && data.len() >= HEAD_ADJUSTMENT_OFFSET + 4 {
            write_u32(data, HEAD_ADJUSTMENT_OFFSET, 0);
            head_offset = Some(table_offset);
        }
        let length = data.len();
        pad4(data);

        output.extend_from_slice(tag.as_bytes());
        output.extend_from_slice(&checksum(data).to_be_bytes());
        output.extend_from_slice(&(table_offset as u32).to_be_bytes());
        output.extend_from_slice(&(length as u32).to_be_bytes());
        table_offset += data.len();
    }

    for (_, data) in &tables {
        output.extend_from_slice(data);
    }

    if let Some(offset) = head_offset {
        let adjustment = CHECKSUM_MAGIC.wrapping_sub(checksum(&output));
        write_u32(&mut output, offset + HEAD_ADJUSTMENT_OFFSET, adjustment);
    }

    output
}
