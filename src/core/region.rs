//! Promoter region computation
//!
//! Turns a principal transcript's start codon into a promoter interval.
//! Upstream/downstream offsets are relative to transcription direction,
//! so they swap roles on the minus strand.

use crate::core::annotation::{AnnotationRecord, Strand};

const START_CODON: &str = "start_codon";

/// An immutable promoter interval in genomic coordinates.
///
/// `start`/`end` are signed: the arithmetic can dip below zero near a
/// contig edge and the raw value is preserved for the extraction tool
/// to deal with. On the minus strand `start > end` is possible when
/// the offsets differ; the interval is handed downstream as computed,
/// never reordered (see `promoter_region`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    /// Carried through for output labeling (the input identifier)
    pub name: String,
    /// BED score column placeholder, always "."
    pub score: String,
    pub strand: Strand,
}

impl Region {
    /// Signed interval length; equals `up + down` on either strand
    pub fn span(&self) -> i64 {
        self.end - self.start
    }
}

/// Compute the promoter interval for a validated principal transcript.
///
/// `records` are the principal transcript's annotation rows; only the
/// first `start_codon` row is read. Uniqueness must already have been
/// established by validation; this function does not re-check it.
///
/// Plus strand: `[cds - up, cds + down]`. Minus strand: the offsets
/// swap, `[cds - down, cds + up]`, because upstream means "greater
/// genomic coordinate" there.
///
/// Returns `None` when no start codon or no usable strand is present
/// (the "nothing to extract" sentinel; the caller skips the
/// identifier).
pub fn promoter_region<'a, I>(records: I, identifier: &str, up: i64, down: i64) -> Option<Region>
where
    I: IntoIterator<Item = &'a AnnotationRecord>,
{
    let start_codon = records
        .into_iter()
        .find(|r| r.feature == START_CODON)?;

    let cds = start_codon.start as i64;
    let strand = start_codon.strand?;

    let (start, end) = match strand {
        Strand::Plus => (cds - up, cds + down),
        Strand::Minus => (cds - down, cds + up),
    };

    Some(Region {
        chrom: start_codon.seqname.clone(),
        start,
        end,
        name: identifier.to_string(),
        score: ".".to_string(),
        strand,
    })
}
