//! `hmtx`: horizontal metrics.
//!
//! On disk the table stores `numberOfHMetrics` (advance, bearing) pairs,
//! then a bare bearing for every remaining glyph; those glyphs reuse the
//! last stored advance. In memory every glyph gets a full pair.

use crate::error::{FontError, Result};
use crate::parse::Reader;
use crate::tag::Tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorMetric {
    pub advance_width: u16,
    pub lsb: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hmtx {
    pub metrics: Vec<HorMetric>,
}

impl Hmtx {
    /// Parse `num_glyphs` metrics of which the first `num_h_metrics` are
    /// explicit pairs.
    ///
    /// Missing trailing bearings read as zero; missing pairs are an error.
    /// A `num_h_metrics` above `num_glyphs` is clamped to it.
    pub fn parse(data: &[u8], num_h_metrics: u16, num_glyphs: u16) -> Result<Self> {
        let num_h_metrics = if num_h_metrics > num_glyphs {
            log::warn!("numberOfHMetrics {num_h_metrics} exceeds numGlyphs {num_glyphs}; clamping");
            num_glyphs
        } else {
            num_h_metrics
        };
        if num_h_metrics == 0 {
            return Err(FontError::malformed(Tag::HMTX, "numberOfHMetrics is zero"));
        }

        let mut r = Reader::new(data, Tag::HMTX);
        let mut metrics = Vec::with_capacity(num_glyphs as usize);
        for _ in 0..num_h_metrics {
            metrics.push(HorMetric {
                advance_width: r.read_u16()?,
                lsb: r.read_i16()?,
            });
        }

        let last_advance = metrics[metrics.len() - 1].advance_width;
        for _ in num_h_metrics..num_glyphs {
            let lsb = if r.remaining() >= 2 { r.read_i16()? } else { 0 };
            metrics.push(HorMetric {
                advance_width: last_advance,
                lsb,
            });
        }

        Ok(Hmtx { metrics })
    }

    pub fn get(&self, gid: u16) -> Option<HorMetric> {
        self.metrics.get(gid as usize).copied()
    }

    pub fn advance(&self, gid: u16) -> Option<u16> {
        self.get(gid).map(|m| m.advance_width)
    }

    /// The smallest `numberOfHMetrics` that reproduces every advance.
    ///
    /// Trailing glyphs sharing the final advance are folded into the
    /// "reuse the last width" run.
    pub fn compact_count(&self) -> u16 {
        let mut count = self.metrics.len();
        if count == 0 {
            return 0;
        }
        let last = self.metrics[count - 1].advance_width;
        while count > 1 && self.metrics[count - 2].advance_width == last {
            count -= 1;
        }
        count as u16
    }

    /// Serialize with `num_h_metrics` explicit pairs.
    pub fn to_bytes(&self, num_h_metrics: u16) -> Vec<u8> {
        let explicit = (num_h_metrics as usize).min(self.metrics.len());
        let mut data = Vec::with_capacity(explicit * 4 + (self.metrics.len() - explicit) * 2);
        for m in &self.metrics[..explicit] {
            data.extend_from_slice(&m.advance_width.to_be_bytes());
            data.extend_from_slice(&m.lsb.to_be_bytes());
        }
        for m in &self.metrics[explicit..] {
            data.extend_from_slice(&m.lsb.to_be_bytes());
        }
        data
    }
}
