//! Four-byte table tags.

use std::fmt;

/// A 4-byte sfnt table tag, e.g. `glyf` or `OS/2`.
///
/// Ordering is byte-wise, which is the order the table directory must use.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const HEAD: Tag = Tag(*b"head");
    pub const HHEA: Tag = Tag(*b"hhea");
    pub const MAXP: Tag = Tag(*b"maxp");
    pub const CMAP: Tag = Tag(*b"cmap");
    pub const HMTX: Tag = Tag(*b"hmtx");
    pub const LOCA: Tag = Tag(*b"loca");
    pub const GLYF: Tag = Tag(*b"glyf");
    pub const NAME: Tag = Tag(*b"name");
    pub const OS2: Tag = Tag(*b"OS/2");
    pub const POST: Tag = Tag(*b"post");

    /// Pseudo-tag used in errors about the offset table and directory.
    pub const SFNT: Tag = Tag(*b"sfnt");

    /// Tables every TrueType outline font must carry.
    pub const REQUIRED: [Tag; 7] = [
        Tag::HEAD,
        Tag::HHEA,
        Tag::MAXP,
        Tag::CMAP,
        Tag::HMTX,
        Tag::LOCA,
        Tag::GLYF,
    ];

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}
