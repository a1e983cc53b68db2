//! PrEx - promoter sequence extraction
//!
//! Resolves heterogeneous gene/transcript identifiers (Ensembl, UCSC,
//! RefSeq, gene symbol) against a GFF3/GTF annotation, validates that
//! exactly one principal isoform exists, computes a strand-aware
//! promoter interval around its start codon, and hands the interval to
//! `bedtools getfasta` for sequence extraction.
//!
//! # Example
//!
//! ```ignore
//! use prex::core::{AnnotationStore, IdKind, promoter_region, validate};
//!
//! let store = AnnotationStore::from_path("gencode.v44.annotation.gff3.gz")?;
//!
//! let kind = IdKind::classify("TP53").unwrap();
//! let column = kind.lookup_column();
//! validate(&store, column, "TP53")?;
//!
//! let tid = store.principal_transcript_id(column, "TP53").unwrap();
//! let rows = store.records_matching(prex::core::LookupColumn::TranscriptId, tid);
//! let region = promoter_region(rows, "TP53", 1000, 500);
//! ```

pub mod core;
pub mod extract;

// Re-export commonly used types
pub use core::{
    AnnotationRecord, AnnotationStore, Config, ConfigError, ExtractError, GffParseError,
    IdKind, LookupColumn, PrexError, Region, ResolvedConfig, Strand, ValidationError,
    promoter_region, validate,
};
pub use extract::{bed_line, bed_name, extract, BedtoolsVersion};
