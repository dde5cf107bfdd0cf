//! # Glyph Dependency Resolver
//!
//! Computes the closed set of glyphs a subset must keep and assigns them
//! new contiguous IDs:
//!
//! 1. `.notdef` (old GID 0) becomes new GID 0
//! 2. used characters, in ascending code point order, take the next IDs
//! 3. composite components are pulled in breadth-first until nothing new
//!    is discovered, so nesting depth is unbounded
//!
//! New-ID assignment order is observable through the CID→GID map, so it
//! must stay deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{FontError, Result};
use crate::tables::glyf::components;
use crate::tables::TableSet;

/// The old↔new glyph ID bijection for one subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRemap {
    old_to_new: BTreeMap<u16, u16>,
    new_to_old: Vec<u16>,
    char_to_new: BTreeMap<char, u16>,
}

impl GlyphRemap {
    /// Number of glyphs in the subset.
    pub fn total_glyphs(&self) -> u16 {
        self.new_to_old.len() as u16
    }

    pub fn old_to_new(&self, old_gid: u16) -> Option<u16> {
        self.old_to_new.get(&old_gid).copied()
    }

    pub fn new_to_old(&self, new_gid: u16) -> Option<u16> {
        self.new_to_old.get(new_gid as usize).copied()
    }

    /// Old GIDs indexed by new GID.
    pub fn old_gids(&self) -> &[u16] {
        &self.new_to_old
    }

    pub fn old_to_new_map(&self) -> &BTreeMap<u16, u16> {
        &self.old_to_new
    }

    /// Used characters that resolved to a retained glyph.
    pub fn char_to_new_map(&self) -> &BTreeMap<char, u16> {
        &self.char_to_new
    }

    /// Give `old_gid` the next new ID unless it already has one.
    fn retain(&mut self, old_gid: u16) -> u16 {
        if let Some(&new_gid) = self.old_to_new.get(&old_gid) {
            return new_gid;
        }
        let new_gid = self.new_to_old.len() as u16;
        self.old_to_new.insert(old_gid, new_gid);
        self.new_to_old.push(old_gid);
        new_gid
    }
}

/// Resolve the glyphs needed to render `chars` with `tables`.
///
/// Characters the cmap doesn't map, or maps past `numGlyphs`, are left out
/// of the character map. A composite component outside the font's glyph
/// range is an error since the subset could not represent it.
pub fn resolve(tables: &TableSet, chars: &BTreeSet<char>) -> Result<GlyphRemap> {
    let num_glyphs = tables.num_glyphs();
    let mut remap = GlyphRemap {
        old_to_new: BTreeMap::new(),
        new_to_old: Vec::new(),
        char_to_new: BTreeMap::new(),
    };
    remap.retain(0);

    for &ch in chars {
        let old_gid = tables.cmap.glyph_id(ch);
        if old_gid == 0 {
            continue;
        }
        if old_gid >= num_glyphs {
            log::debug!("U+{:04X} maps to glyph {old_gid} past numGlyphs; skipped", ch as u32);
            continue;
        }
        let new_gid = remap.retain(old_gid);
        remap.char_to_new.insert(ch, new_gid);
    }

    // The retained list doubles as the BFS queue: everything past `cursor`
    // hasn't had its components inspected yet.
    let mut cursor = 0;
    while cursor < remap.new_to_old.len() {
        let old_gid = remap.new_to_old[cursor];
        cursor += 1;

        let Some(record) = tables.glyph(old_gid) else {
            continue;
        };
        for component in components(record)? {
            if component.glyph_id >= num_glyphs {
                return Err(FontError::InvalidGlyphReference {
                    glyph: old_gid,
                    component: component.glyph_id,
                });
            }
            if !remap.old_to_new.contains_key(&component.glyph_id) {
                let new_gid = remap.retain(component.glyph_id);
                log::trace!(
                    "glyph {old_gid} pulls in component {} as {new_gid}",
                    component.glyph_id
                );
            }
        }
    }

    Ok(remap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::glyf::GlyphKind;
    use crate::tables::glyf::{glyph_kind, WE_HAVE_A_SCALE};
    use crate::tables::head::LocaFormat;
    use crate::testing::{build_tables, composite_glyph, sample_tables, simple_glyph};
    use pretty_assertions::assert_eq;

    fn chars(text: &str) -> BTreeSet<char> {
        text.chars().collect()
    }

    #[test]
    fn test_notdef_always_first() {
        let tables = sample_tables();
        for text in ["", "A", "CBA", "\u{1FA}", "xyz"] {
            let remap = resolve(&tables, &chars(text)).unwrap();
            assert_eq!(remap.old_to_new(0), Some(0));
            assert_eq!(remap.new_to_old(0), Some(0));
        }
    }

    #[test]
    fn test_empty_text_keeps_only_notdef() {
        let remap = resolve(&sample_tables(), &BTreeSet::new()).unwrap();
        assert_eq!(remap.total_glyphs(), 1);
        assert!(remap.char_to_new_map().is_empty());
    }

    #[test]
    fn test_characters_assigned_in_code_point_order() {
        // C (old 8) sorts after A (old 2) and B (old 3) regardless of input order.
        let remap = resolve(&sample_tables(), &chars("CAB")).unwrap();
        assert_eq!(remap.old_gids(), &[0, 2, 3, 8]);
        assert_eq!(remap.char_to_new_map()[&'A'], 1);
        assert_eq!(remap.char_to_new_map()[&'B'], 2);
        assert_eq!(remap.char_to_new_map()[&'C'], 3);
    }

    #[test]
    fn test_unmapped_characters_skipped() {
        let remap = resolve(&sample_tables(), &chars("AzZ")).unwrap();
        assert_eq!(remap.total_glyphs(), 2);
        assert_eq!(remap.char_to_new_map().len(), 1);
    }

    #[test]
    fn test_nested_composites_closed_breadth_first() {
        // U+01FA → 7 = [5, 6], 5 = [2, 4]
        let remap = resolve(&sample_tables(), &chars("\u{1FA}")).unwrap();
        assert_eq!(remap.old_gids(), &[0, 7, 5, 6, 2, 4]);
        assert_eq!(remap.char_to_new_map()[&'\u{1FA}'], 1);
    }

    #[test]
    fn test_component_shared_with_used_char() {
        let remap = resolve(&sample_tables(), &chars("A\u{C1}")).unwrap();
        assert_eq!(remap.old_gids(), &[0, 2, 5, 4]);
    }

    #[test]
    fn test_every_component_retained() {
        let tables = sample_tables();
        let remap = resolve(&tables, &chars(" ABC\u{C1}\u{1FA}")).unwrap();
        for &old_gid in remap.old_gids() {
            let record = tables.glyph(old_gid).unwrap();
            for component in components(record).unwrap() {
                let new_gid = remap.old_to_new(component.glyph_id).unwrap();
                assert!(new_gid < remap.total_glyphs());
            }
        }
    }

    #[test]
    fn test_notdef_components_followed() {
        let glyphs = vec![composite_glyph(&[(1, 0)]), simple_glyph(0, 0, 10, 10)];
        let tables = build_tables(&glyphs, &[500, 500], &[], LocaFormat::Long);
        assert_eq!(glyph_kind(tables.glyph(0).unwrap()).unwrap(), GlyphKind::Composite);

        let remap = resolve(&tables, &BTreeSet::new()).unwrap();
        assert_eq!(remap.old_gids(), &[0, 1]);
    }

    #[test]
    fn test_component_out_of_range() {
        let glyphs = vec![
            simple_glyph(0, 0, 10, 10),
            composite_glyph(&[(40, WE_HAVE_A_SCALE)]),
        ];
        let tables = build_tables(&glyphs, &[500, 500], &[(0x41, 1)], LocaFormat::Long);
        let err = resolve(&tables, &chars("A")).unwrap_err();
        assert_eq!(
            err,
            FontError::InvalidGlyphReference {
                glyph: 1,
                component: 40
            }
        );
    }

    #[test]
    fn test_cmap_gid_past_num_glyphs_skipped() {
        let glyphs = vec![simple_glyph(0, 0, 10, 10), simple_glyph(0, 0, 20, 20)];
        let tables = build_tables(&glyphs, &[500, 500], &[(0x41, 1), (0x42, 9)], LocaFormat::Long);
        let remap = resolve(&tables, &chars("AB")).unwrap();
        assert_eq!(remap.total_glyphs(), 2);
        assert!(!remap.char_to_new_map().contains_key(&'B'));
    }
}
