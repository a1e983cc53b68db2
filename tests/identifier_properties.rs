//! Identifier classification property tests
//!
//! Checks that the prefix patterns keep their precedence over the
//! symbol fallback for every generated identifier.

use prex::core::{IdKind, LookupColumn};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn arb_digits11() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 11)
        .prop_map(|ds| ds.into_iter().map(|d| (b'0' + d) as char).collect())
}

fn arb_symbol() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{1,9}"
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: ENST + 11 digits always classifies as Ensembl transcript
    #[test]
    fn test_enst_always_transcript(digits in arb_digits11(), suffix in "[A-Za-z0-9]{0,4}") {
        let id = format!("ENST{}{}", digits, suffix);
        prop_assert_eq!(IdKind::classify(&id), Some(IdKind::EnsemblTranscript));
        prop_assert_eq!(
            IdKind::classify(&id).unwrap().lookup_column(),
            LookupColumn::TranscriptId
        );
    }

    /// Property: ENSG + 11 digits always classifies as Ensembl gene
    #[test]
    fn test_ensg_always_gene(digits in arb_digits11()) {
        let id = format!("ENSG{}", digits);
        prop_assert_eq!(IdKind::classify(&id), Some(IdKind::EnsemblGene));
    }

    /// Property: UCSC ids beat the symbol fallback despite containing
    /// symbol-like tokens after the dot
    #[test]
    fn test_ucsc_precedence(n in 0u32..1000, version in 1u32..20) {
        let id = format!("uc{:03}abc.{}", n, version);
        prop_assert_eq!(IdKind::classify(&id), Some(IdKind::UcscTranscript));
        prop_assert_eq!(
            IdKind::classify(&id).unwrap().lookup_column(),
            LookupColumn::Undefined
        );
    }

    /// Property: RefSeq prefixes classify as RefSeq for all four
    /// prefix combinations
    #[test]
    fn test_refseq_prefixes(
        first in prop_oneof![Just('N'), Just('X')],
        second in prop_oneof![Just('G'), Just('M')],
        acc in "[0-9]{6,9}"
    ) {
        let id = format!("{}{}_{}", first, second, acc);
        prop_assert_eq!(IdKind::classify(&id), Some(IdKind::RefSeq));
    }

    /// Property: symbols only match when none of the four prefix
    /// patterns do
    #[test]
    fn test_symbol_is_fallback(symbol in arb_symbol()) {
        match IdKind::classify(&symbol) {
            Some(IdKind::Symbol) => {
                let enst = regex::Regex::new(r"^ENST[0-9]{11}").unwrap();
                let ensg = regex::Regex::new(r"^ENSG[0-9]{11}").unwrap();
                let ucsc = regex::Regex::new(r"^uc[0-9]{3}[a-z]{3}\.").unwrap();
                let refseq = regex::Regex::new(r"^[NX][GM]_").unwrap();
                prop_assert!(!enst.is_match(&symbol));
                prop_assert!(!ensg.is_match(&symbol));
                prop_assert!(!ucsc.is_match(&symbol));
                prop_assert!(!refseq.is_match(&symbol));
            }
            Some(_) => {} // one of the stricter prefixes won, as intended
            None => prop_assert!(false, "generated symbol {:?} did not classify", symbol),
        }
    }

    /// Property: lowercase-only input never classifies (except UCSC ids)
    #[test]
    fn test_lowercase_non_ucsc_is_unknown(id in "[a-z]{1,8}") {
        if !id.starts_with("uc") {
            prop_assert_eq!(IdKind::classify(&id), None);
        }
    }
}

// ============================================================================
// Fixed examples
// ============================================================================

#[test]
fn test_known_identifiers() {
    assert_eq!(
        IdKind::classify("ENST00000380152"),
        Some(IdKind::EnsemblTranscript)
    );
    assert_eq!(
        IdKind::classify("ENST00000380152").unwrap().lookup_column(),
        LookupColumn::TranscriptId
    );

    assert_eq!(IdKind::classify("TP53"), Some(IdKind::Symbol));
    assert_eq!(
        IdKind::classify("TP53").unwrap().lookup_column(),
        LookupColumn::GeneName
    );

    assert_eq!(IdKind::classify("NM_007294"), Some(IdKind::RefSeq));
    assert_eq!(IdKind::classify("uc010whs.1"), Some(IdKind::UcscTranscript));
}
