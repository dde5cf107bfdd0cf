//! `name`: naming table.
//!
//! Strings are kept as raw bytes so the table re-serializes unchanged;
//! decoding happens on demand.

use crate::error::{FontError, Result};
use crate::parse::Reader;
use crate::tag::Tag;

pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_POSTSCRIPT: u16 = 6;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_MACINTOSH: u16 = 1;
const PLATFORM_WINDOWS: u16 = 3;
const LANGUAGE_EN_US: u16 = 0x0409;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: Vec<u8>,
}

impl NameRecord {
    /// Decode the string: UTF-16BE for Unicode and Windows records, one byte
    /// per character for Macintosh records.
    pub fn decode(&self) -> Option<String> {
        match self.platform_id {
            PLATFORM_UNICODE | PLATFORM_WINDOWS => {
                if self.value.len() % 2 != 0 {
                    return None;
                }
                let units: Vec<u16> = self
                    .value
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            }
            PLATFORM_MACINTOSH => Some(self.value.iter().map(|&b| b as char).collect()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameTable {
    pub format: u16,
    pub records: Vec<NameRecord>,
    /// Format 1 language-tag strings, raw UTF-16BE.
    pub lang_tags: Vec<Vec<u8>>,
}

impl NameTable {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data, Tag::NAME);
        let format = r.read_u16()?;
        if format > 1 {
            return Err(FontError::malformed(
                Tag::NAME,
                format!("unknown format {format}"),
            ));
        }
        let count = r.read_u16()?;
        let storage_offset = r.read_u16()? as usize;

        let mut raw = Vec::with_capacity(count as usize);
        for _ in 0..count {
            raw.push((
                r.read_u16()?,
                r.read_u16()?,
                r.read_u16()?,
                r.read_u16()?,
                r.read_u16()? as usize,
                r.read_u16()? as usize,
            ));
        }

        let mut lang_tag_ranges = Vec::new();
        if format == 1 {
            let tag_count = r.read_u16()?;
            for _ in 0..tag_count {
                lang_tag_ranges.push((r.read_u16()? as usize, r.read_u16()? as usize));
            }
        }

        let string_at = |length: usize, offset: usize| -> Result<Vec<u8>> {
            let mut s = Reader::at(data, storage_offset + offset, Tag::NAME)?;
            Ok(s.read_bytes(length)?.to_vec())
        };

        let records = raw
            .into_iter()
            .map(
                |(platform_id, encoding_id, language_id, name_id, length, offset)| {
                    Ok(NameRecord {
                        platform_id,
                        encoding_id,
                        language_id,
                        name_id,
                        value: string_at(length, offset)?,
                    })
                },
            )
            .collect::<Result<Vec<_>>>()?;

        let lang_tags = lang_tag_ranges
            .into_iter()
            .map(|(length, offset)| string_at(length, offset))
            .collect::<Result<Vec<_>>>()?;

        Ok(NameTable {
            format,
            records,
            lang_tags,
        })
    }

    /// Best decodable string for `name_id`: Windows English first, then any
    /// Unicode or Windows record, then Macintosh.
    pub fn get(&self, name_id: u16) -> Option<String> {
        let candidates = || self.records.iter().filter(move |r| r.name_id == name_id);

        candidates()
            .filter(|r| r.platform_id == PLATFORM_WINDOWS && r.language_id == LANGUAGE_EN_US)
            .chain(candidates().filter(|r| {
                r.platform_id == PLATFORM_WINDOWS || r.platform_id == PLATFORM_UNICODE
            }))
            .chain(candidates().filter(|r| r.platform_id == PLATFORM_MACINTOSH))
            .find_map(NameRecord::decode)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let header_len = 6
            + self.records.len() * 12
            + if self.format == 1 {
                2 + self.lang_tags.len() * 4
            } else {
                0
            };

        let mut storage: Vec<u8> = Vec::new();
        let mut data = Vec::with_capacity(header_len);
        data.extend_from_slice(&self.format.to_be_bytes());
        data.extend_from_slice(&(self.records.len() as u16).to_be_bytes());
        data.extend_from_slice(&(header_len as u16).to_be_bytes());

        for record in &self.records {
            data.extend_from_slice(&record.platform_id.to_be_bytes());
            data.extend_from_slice(&record.encoding_id.to_be_bytes());
            data.extend_from_slice(&record.language_id.to_be_bytes());
            data.extend_from_slice(&record.name_id.to_be_bytes());
            data.extend_from_slice(&(record.value.len() as u16).to_be_bytes());
            data.extend_from_slice(&(storage.len() as u16).to_be_bytes());
            storage.extend_from_slice(&record.value);
        }

        if self.format == 1 {
            data.extend_from_slice(&(self.lang_tags.len() as u16).to_be_bytes());
            for tag in &self.lang_tags {
                data.extend_from_slice(&(tag.len() as u16).to_be_bytes());
                data.extend_from_slice(&(storage.len() as u16).to_be_bytes());
                storage.extend_from_slice(tag);
            }
        }

        data.extend_from_slice(&storage);
        data
    }
}

/// Build a Windows English UTF-16BE record.
pub fn windows_record(name_id: u16, value: &str) -> NameRecord {
    NameRecord {
        platform_id: PLATFORM_WINDOWS,
        encoding_id: 1,
        language_id: LANGUAGE_EN_US,
        name_id,
        value: value.encode_utf16().flat_map(|c| c.to_be_bytes()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::read_u16;

    #[test]
    fn test_name_table_roundtrip_and_lookup() {
        let table = NameTable {
            format: 0,
            records: vec![
                NameRecord {
                    platform_id: PLATFORM_MACINTOSH,
                    encoding_id: 0,
                    language_id: 0,
                    name_id: NAME_ID_FAMILY,
                    value: b"Mac Family".to_vec(),
                },
                windows_record(NAME_ID_FAMILY, "Test Sans"),
                windows_record(NAME_ID_POSTSCRIPT, "TestSans-Regular"),
            ],
            lang_tags: Vec::new(),
        };
        let bytes = table.to_bytes();
        assert_eq!(read_u16(&bytes, 2), 3);
        assert_eq!(read_u16(&bytes, 4), 6 + 3 * 12);

        let parsed = NameTable::parse(&bytes).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.get(NAME_ID_FAMILY).as_deref(), Some("Test Sans"));
        assert_eq!(
            parsed.get(NAME_ID_POSTSCRIPT).as_deref(),
            Some("TestSans-Regular")
        );
        assert_eq!(parsed.get(NAME_ID_FULL_NAME), None);
    }

    #[test]
    fn test_name_mac_fallback() {
        let table = NameTable {
            format: 0,
            records: vec![NameRecord {
                platform_id: PLATFORM_MACINTOSH,
                encoding_id: 0,
                language_id: 0,
                name_id: NAME_ID_FULL_NAME,
                value: b"Old Style".to_vec(),
            }],
            lang_tags: Vec::new(),
        };
        assert_eq!(table.get(NAME_ID_FULL_NAME).as_deref(), Some("Old Style"));
    }

    #[test]
    fn test_name_format1_lang_tags() {
        let table = NameTable {
            format: 1,
            records: vec![windows_record(NAME_ID_FAMILY, "X")],
            lang_tags: vec!["en".encode_utf16().flat_map(|c| c.to_be_bytes()).collect()],
        };
        let parsed = NameTable::parse(&table.to_bytes()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_name_string_out_of_range() {
        let mut bytes = NameTable {
            format: 0,
            records: vec![windows_record(NAME_ID_FAMILY, "Family")],
            lang_tags: Vec::new(),
        }
        .to_bytes();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            NameTable::parse(&bytes),
            Err(FontError::Truncated { tag: Tag::NAME, .. })
        ));
    }
}
