//! Gene identifier classification
//!
//! Guesses whether a user-supplied identifier is a gene symbol, an
//! Ensembl gene/transcript id, a RefSeq id, or a UCSC transcript id,
//! and maps each kind to the annotation column used to look it up.

use once_cell::sync::Lazy;
use regex::Regex;

/// Annotation column an identifier kind is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupColumn {
    TranscriptId,
    GeneId,
    GeneName,
    /// No column mapping exists yet for this kind (UCSC, RefSeq).
    /// Lookups against it match nothing and fail validation downstream.
    Undefined,
}

impl LookupColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupColumn::TranscriptId => "transcript_id",
            LookupColumn::GeneId => "gene_id",
            LookupColumn::GeneName => "gene_name",
            LookupColumn::Undefined => "TBD",
        }
    }
}

impl std::fmt::Display for LookupColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized identifier kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    EnsemblTranscript,
    EnsemblGene,
    UcscTranscript,
    RefSeq,
    Symbol,
}

static ENST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ENST[0-9]{11}").unwrap());
static ENSG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ENSG[0-9]{11}").unwrap());
static UCSC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^uc[0-9]{3}[a-z]{3}\.").unwrap());
static REFSEQ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[NX][GM]_").unwrap());
// Intentionally unanchored: a symbol-like token anywhere in the string counts.
static SYMBOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z0-9][A-Za-z0-9]+").unwrap());

impl IdKind {
    /// Classify a raw identifier string.
    ///
    /// Match order matters: the Ensembl/UCSC/RefSeq prefixes are strict
    /// subsets of what the symbol fallback accepts, so they are tried
    /// first. Returns `None` when nothing matches.
    ///
    /// # Examples
    /// ```
    /// use prex::core::IdKind;
    /// assert_eq!(IdKind::classify("ENST00000380152"), Some(IdKind::EnsemblTranscript));
    /// assert_eq!(IdKind::classify("TP53"), Some(IdKind::Symbol));
    /// ```
    pub fn classify(identifier: &str) -> Option<IdKind> {
        if ENST_RE.is_match(identifier) {
            Some(IdKind::EnsemblTranscript)
        } else if ENSG_RE.is_match(identifier) {
            Some(IdKind::EnsemblGene)
        } else if UCSC_RE.is_match(identifier) {
            Some(IdKind::UcscTranscript)
        } else if REFSEQ_RE.is_match(identifier) {
            Some(IdKind::RefSeq)
        } else if SYMBOL_RE.is_match(identifier) {
            Some(IdKind::Symbol)
        } else {
            None
        }
    }

    /// Annotation column this kind is looked up in
    pub fn lookup_column(&self) -> LookupColumn {
        match self {
            IdKind::EnsemblTranscript => LookupColumn::TranscriptId,
            IdKind::EnsemblGene => LookupColumn::GeneId,
            IdKind::UcscTranscript => LookupColumn::Undefined,
            IdKind::RefSeq => LookupColumn::Undefined,
            IdKind::Symbol => LookupColumn::GeneName,
        }
    }

    /// Human-readable description for per-identifier reporting
    pub fn description(&self) -> &'static str {
        match self {
            IdKind::EnsemblTranscript => "ensembl! transcript",
            IdKind::EnsemblGene => "ensembl! gene",
            IdKind::UcscTranscript => "UCSC transcript id",
            IdKind::RefSeq => "NCBI Refseq id",
            IdKind::Symbol => "Official gene symbol",
        }
    }
}
