//! # Table Codecs
//!
//! One module per table, each with a `parse` from raw bytes and a
//! `to_bytes` back. [`TableSet`] ties them together: it dispatches the
//! directory's tables to their codecs and serializes a full set again.

pub mod cmap;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;

use crate::error::{FontError, Result};
use crate::options::LoadOptions;
use crate::sfnt::{write_font, TableDirectory};
use crate::tag::Tag;

use cmap::Cmap;
use glyf::Glyf;
use head::Head;
use hhea::Hhea;
use hmtx::Hmtx;
use loca::Loca;
use maxp::Maxp;
use name::NameTable;
use os2::Os2;
use post::Post;

/// Every table the engine understands, parsed.
///
/// The first seven are required for a TrueType outline font; `name`,
/// `OS/2` and `post` are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSet {
    pub head: Head,
    pub hhea: Hhea,
    pub maxp: Maxp,
    pub cmap: Cmap,
    pub hmtx: Hmtx,
    pub loca: Loca,
    pub glyf: Glyf,
    pub name: Option<NameTable>,
    pub os2: Option<Os2>,
    pub post: Option<Post>,
}

impl TableSet {
    /// Parse a TrueType file.
    pub fn parse(data: &[u8], options: &LoadOptions) -> Result<Self> {
        let directory = TableDirectory::parse(data)?;

        for tag in directory.checksum_mismatches(data) {
            log::warn!("table '{tag}' checksum does not match its contents");
        }

        if let Some(&missing) = Tag::REQUIRED.iter().find(|&&tag| !directory.contains(tag)) {
            return Err(FontError::MissingTable(missing));
        }
        let required = |tag: Tag| {
            directory
                .table_data(data, tag)
                .ok_or(FontError::MissingTable(tag))
        };

        let head = Head::parse(required(Tag::HEAD)?)?;
        let hhea = Hhea::parse(required(Tag::HHEA)?)?;
        let maxp = Maxp::parse(required(Tag::MAXP)?)?;
        let num_glyphs = maxp.num_glyphs;
        let cmap = Cmap::parse(required(Tag::CMAP)?)?;
        let hmtx = Hmtx::parse(required(Tag::HMTX)?, hhea.number_of_h_metrics, num_glyphs)?;
        let loca = Loca::parse(required(Tag::LOCA)?, head.index_to_loc_format, num_glyphs)?;
        let glyf = Glyf::parse(required(Tag::GLYF)?);
        glyf.validate(&loca)?;

        let optional = |tag: Tag| directory.table_data(data, tag);
        let name = parse_optional(Tag::NAME, optional(Tag::NAME), options, NameTable::parse)?;
        let os2 = parse_optional(Tag::OS2, optional(Tag::OS2), options, Os2::parse)?;
        let post = parse_optional(Tag::POST, optional(Tag::POST), options, Post::parse)?;

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
            post,
        })
    }

    pub fn num_glyphs(&self) -> u16 {
        self.maxp.num_glyphs
    }

    /// Raw glyf record for `gid`; `None` if out of range.
    pub fn glyph(&self, gid: u16) -> Option<&[u8]> {
        self.glyf.glyph(&self.loca, gid)
    }

    /// Serialize every present table to (tag, bytes) pairs.
    ///
    /// `hmtx` is written with `hhea.numberOfHMetrics` explicit pairs and
    /// `loca` in `head.indexToLocFormat`.
    pub fn to_tables(&self) -> Vec<(Tag, Vec<u8>)> {
        let mut tables = vec![
            (Tag::HEAD, self.head.to_bytes()),
            (Tag::HHEA, self.hhea.to_bytes()),
            (Tag::MAXP, self.maxp.to_bytes()),
            (Tag::CMAP, self.cmap.to_bytes()),
            (Tag::HMTX, self.hmtx.to_bytes(self.hhea.number_of_h_metrics)),
            (Tag::LOCA, self.loca.to_bytes(self.head.index_to_loc_format)),
            (Tag::GLYF, self.glyf.data.clone()),
        ];
        if let Some(name) = &self.name {
            tables.push((Tag::NAME, name.to_bytes()));
        }
        if let Some(os2) = &self.os2 {
            tables.push((Tag::OS2, os2.to_bytes()));
        }
        if let Some(post) = &self.post {
            tables.push((Tag::POST, post.to_bytes()));
        }
        tables
    }

    /// Serialize to a complete, checksummed TrueType file.
    pub fn to_bytes(&self) -> Vec<u8> {
        write_font(self.to_tables())
    }
}

fn parse_optional<T>(
    tag: Tag,
    data: Option<&[u8]>,
    options: &LoadOptions,
    parse: fn(&[u8]) -> Result<T>,
) -> Result<Option<T>> {
    let Some(data) = data else {
        return Ok(None);
    };
    match parse(data) {
        Ok(table) => Ok(Some(table)),
        Err(e) if options.lenient_optional_tables => {
            log::warn!("dropping unparsable optional table '{tag}': {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
