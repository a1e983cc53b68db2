//! Principal isoform validation
//!
//! Checks that an identifier exists in the annotation and resolves to
//! exactly one principal transcript isoform. The principal isoform can
//! carry any APPRIS rank (appris_principal_1, _2, _3, ...), but after
//! deduplicating start-codon coordinates there must be a single one.

use crate::core::annotation::AnnotationStore;
use crate::core::error::{ValidationError, ValidationResult};
use crate::core::identifier::LookupColumn;

const START_CODON: &str = "start_codon";

/// Distinct (start, end) pairs of principal-tagged start-codon rows
/// matching the identifier. Order of first appearance is kept.
fn principal_start_codons(
    store: &AnnotationStore,
    column: LookupColumn,
    identifier: &str,
) -> Vec<(u64, u64)> {
    let mut coords: Vec<(u64, u64)> = Vec::new();
    for record in store.records_matching(column, identifier) {
        if record.appris_principal.is_none() || record.feature != START_CODON {
            continue;
        }
        let pair = (record.start, record.end);
        if !coords.contains(&pair) {
            coords.push(pair);
        }
    }
    coords
}

/// Validate that `identifier` names exactly one principal isoform.
///
/// Three failure modes, each recoverable (the caller warns and skips):
/// the identifier is unknown to the lookup column, the gene has no
/// principal isoform, or more than one distinct principal start codon
/// exists. Multiple principal transcripts that share a start codon
/// deduplicate to one pair and are valid.
///
/// No priority tie-break between APPRIS ranks is applied; an ambiguous
/// gene is skipped rather than silently resolved to one isoform.
///
/// Pure with respect to its inputs: no logging, no mutation.
pub fn validate(
    store: &AnnotationStore,
    column: LookupColumn,
    identifier: &str,
) -> ValidationResult<()> {
    if store.rows_matching(column, identifier).is_empty() {
        return Err(ValidationError::UnknownIdentifier {
            column,
            identifier: identifier.to_string(),
        });
    }

    match principal_start_codons(store, column, identifier).len() {
        0 => Err(ValidationError::NoPrincipalIsoform {
            identifier: identifier.to_string(),
        }),
        1 => Ok(()),
        _ => Err(ValidationError::AmbiguousPrincipal {
            identifier: identifier.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(gtf: &str) -> AnnotationStore {
        AnnotationStore::from_reader(gtf.as_bytes()).unwrap()
    }

    const VALID_GENE: &str = "\
chr1\thavana\ttranscript\t100\t900\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\";
chr1\thavana\tstart_codon\t120\t122\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\"; tag \"appris_principal_1\";
chr1\thavana\ttranscript\t100\t800\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T2\"; gene_name \"ALPHA\";
";

    #[test]
    fn test_valid_identifier() {
        let store = store(VALID_GENE);
        assert!(validate(&store, LookupColumn::GeneName, "ALPHA").is_ok());
        assert!(validate(&store, LookupColumn::GeneId, "G1").is_ok());
        assert!(validate(&store, LookupColumn::TranscriptId, "T1").is_ok());
    }

    #[test]
    fn test_unknown_identifier() {
        let store = store(VALID_GENE);
        let err = validate(&store, LookupColumn::GeneName, "FAKEGENE").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownIdentifier {
                column: LookupColumn::GeneName,
                identifier: "FAKEGENE".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "no gene_name known by this identifier: FAKEGENE"
        );
    }

    #[test]
    fn test_undefined_column_never_matches() {
        let store = store(VALID_GENE);
        let err = validate(&store, LookupColumn::Undefined, "NM_000546").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownIdentifier { .. }));
    }

    #[test]
    fn test_no_principal_isoform() {
        let gtf = "\
chr1\thavana\ttranscript\t100\t900\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\";
chr1\thavana\tstart_codon\t120\t122\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\";
";
        let store = store(gtf);
        let err = validate(&store, LookupColumn::GeneName, "ALPHA").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NoPrincipalIsoform { identifier: "ALPHA".to_string() }
        );
        assert_eq!(err.to_string(), "no principal isoform found for ALPHA");
    }

    #[test]
    fn test_principal_without_start_codon_is_not_enough() {
        // Principal tag on a transcript row alone does not count; the
        // anchor must be a start_codon feature.
        let gtf = "\
chr1\thavana\ttranscript\t100\t900\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\"; tag \"appris_principal_1\";
";
        let store = store(gtf);
        let err = validate(&store, LookupColumn::GeneName, "ALPHA").unwrap_err();
        assert!(matches!(err, ValidationError::NoPrincipalIsoform { .. }));
    }

    #[test]
    fn test_ambiguous_principal_isoforms() {
        let gtf = "\
chr1\thavana\tstart_codon\t120\t122\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\"; tag \"appris_principal_1\";
chr1\thavana\tstart_codon\t340\t342\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T2\"; gene_name \"ALPHA\"; tag \"appris_principal_2\";
";
        let store = store(gtf);
        let err = validate(&store, LookupColumn::GeneName, "ALPHA").unwrap_err();
        assert_eq!(
            err,
            ValidationError::AmbiguousPrincipal { identifier: "ALPHA".to_string() }
        );
        assert_eq!(err.to_string(), "too many primary isoforms for ALPHA");
    }

    #[test]
    fn test_shared_start_codon_deduplicates() {
        // Two principal transcripts sharing one start codon collapse to
        // a single coordinate pair and validate.
        let gtf = "\
chr1\thavana\tstart_codon\t120\t122\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T1\"; gene_name \"ALPHA\"; tag \"appris_principal_1\";
chr1\thavana\tstart_codon\t120\t122\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T2\"; gene_name \"ALPHA\"; tag \"appris_principal_2\";
";
        let store = store(gtf);
        assert!(validate(&store, LookupColumn::GeneName, "ALPHA").is_ok());
    }

    #[test]
    fn test_validate_is_pure() {
        let store = store(VALID_GENE);
        let first = validate(&store, LookupColumn::GeneName, "FAKEGENE");
        let second = validate(&store, LookupColumn::GeneName, "FAKEGENE");
        assert_eq!(first, second);
    }
}
