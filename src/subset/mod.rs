//! # Font Subsetting
//!
//! Strips a TrueType font down to the glyphs a piece of text needs. A
//! typical text font is 50-200KB; a subset covering one document's
//! characters is usually a few KB.
//!
//! ## Approach
//!
//! 1. Resolve the used characters to glyphs, plus every composite
//!    component they depend on ([`resolve`](resolve::resolve))
//! 2. Renumber the kept glyphs contiguously from 0
//! 3. Rebuild each table for the new glyph count
//!    ([`regenerate`](regenerate::regenerate))
//! 4. Serialize a checksummed sfnt file
//!
//! The renumbering is exposed as [`SubsetResult::cid_to_gid`]: PDF CIDFont
//! width arrays and content streams reference glyphs by their new IDs.

pub mod regenerate;
pub mod resolve;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::font::{fnv1a, TrueTypeFont};
use crate::options::SubsetOptions;

pub use resolve::GlyphRemap;

/// Output of a subsetting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetResult {
    /// The subset TrueType file.
    pub font_data: Vec<u8>,
    /// Original glyph ID → subset glyph ID for every retained glyph.
    pub cid_to_gid: BTreeMap<u16, u16>,
    /// Used characters that resolved to a glyph, with their subset IDs.
    pub char_to_gid: BTreeMap<char, u16>,
    pub total_glyphs: u16,
}

impl SubsetResult {
    /// Six uppercase letters identifying this subset, for the `ABCDEF+`
    /// prefix PDF puts in front of an embedded subset's `BaseFont`.
    ///
    /// Derived from the retained glyph list, so identical subsets share a tag.
    pub fn subset_tag(&self) -> String {
        let mut bytes = Vec::with_capacity(self.cid_to_gid.len() * 4);
        for (&old, &new) in &self.cid_to_gid {
            bytes.extend_from_slice(&old.to_be_bytes());
            bytes.extend_from_slice(&new.to_be_bytes());
        }
        let mut hash = fnv1a(&bytes);
        (0..6)
            .map(|_| {
                let letter = (b'A' + (hash % 26) as u8) as char;
                hash /= 26;
                letter
            })
            .collect()
    }
}

/// Subsets one loaded font; the font itself is never modified.
pub struct FontSubsetter<'a> {
    font: &'a TrueTypeFont,
    options: SubsetOptions,
}

impl<'a> FontSubsetter<'a> {
    pub fn new(font: &'a TrueTypeFont) -> Self {
        Self::with_options(font, SubsetOptions::default())
    }

    pub fn with_options(font: &'a TrueTypeFont, options: SubsetOptions) -> Self {
        FontSubsetter { font, options }
    }

    /// Build a subset containing `.notdef` and the glyphs for `chars`.
    pub fn subset(&self, chars: impl IntoIterator<Item = char>) -> Result<SubsetResult> {
        let used: BTreeSet<char> = chars.into_iter().collect();
        let tables = self.font.tables();

        let remap = resolve::resolve(tables, &used)?;
        let regenerated = regenerate::regenerate(tables, &remap, &self.options)?;
        let font_data = regenerated.to_bytes();

        log::debug!(
            "subset: {} chars → {} of {} glyphs, {} → {} bytes",
            used.len(),
            remap.total_glyphs(),
            tables.num_glyphs(),
            self.font.data().len(),
            font_data.len()
        );

        Ok(SubsetResult {
            font_data,
            cid_to_gid: remap.old_to_new_map().clone(),
            char_to_gid: remap.char_to_new_map().clone(),
            total_glyphs: remap.total_glyphs(),
        })
    }

    pub fn subset_text(&self, text: &str) -> Result<SubsetResult> {
        self.subset(text.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LoadOptions;
    use crate::sfnt::{checksum, CHECKSUM_MAGIC};
    use crate::tables::TableSet;
    use crate::testing::sample_font_bytes;
    use pretty_assertions::assert_eq;

    fn sample_font() -> TrueTypeFont {
        TrueTypeFont::load(sample_font_bytes()).unwrap()
    }

    #[test]
    fn test_subset_roundtrips_through_parser() {
        let font = sample_font();
        let result = FontSubsetter::new(&font).subset_text("BA").unwrap();
        let tables = TableSet::parse(&result.font_data, &LoadOptions::default()).unwrap();
        assert_eq!(tables.num_glyphs(), result.total_glyphs);
        assert_eq!(tables.cmap.glyph_id('A'), result.char_to_gid[&'A']);
        assert_eq!(tables.cmap.glyph_id('B'), result.char_to_gid[&'B']);
        assert_eq!(tables.cmap.glyph_id('C'), 0);
    }

    #[test]
    fn test_subset_checksum() {
        let font = sample_font();
        let result = FontSubsetter::new(&font).subset_text("ABC").unwrap();
        assert_eq!(checksum(&result.font_data), CHECKSUM_MAGIC);
    }

    #[test]
    fn test_repeated_characters_dont_change_result() {
        let font = sample_font();
        let subsetter = FontSubsetter::new(&font);
        let once = subsetter.subset_text("A").unwrap();
        let many = subsetter.subset_text("AAAA").unwrap();
        assert_eq!(once, many);
    }

    #[test]
    fn test_cid_to_gid_covers_components() {
        let font = sample_font();
        let result = FontSubsetter::new(&font).subset_text("\u{C1}").unwrap();
        let expected: BTreeMap<u16, u16> = [(0, 0), (5, 1), (2, 2), (4, 3)].into_iter().collect();
        assert_eq!(result.cid_to_gid, expected);
        assert_eq!(result.char_to_gid.len(), 1);
    }

    #[test]
    fn test_subset_tag() {
        let font = sample_font();
        let subsetter = FontSubsetter::new(&font);
        let a = subsetter.subset_text("A").unwrap().subset_tag();
        let b = subsetter.subset_text("AA").unwrap().subset_tag();
        let c = subsetter.subset_text("BC").unwrap().subset_tag();
        assert_eq!(a.len(), 6);
        assert!(a.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_retained_name_tables() {
        let font = sample_font();
        let options = SubsetOptions {
            retain_name_tables: true,
            ..Default::default()
        };
        let result = FontSubsetter::with_options(&font, options).subset_text("A").unwrap();
        let tables = TableSet::parse(&result.font_data, &LoadOptions::default()).unwrap();
        assert!(tables.name.is_some());
        assert!(tables.os2.is_some());
    }
}
