//! Property-based tests for classification, normalization, and dispatch
//!
//! Generated queries cover every separator and casing the grammar accepts.

use ferro_resolve::dataset::DatasetContext;
use ferro_resolve::identifiers::{Identifier, IdentifierKind, RegionId, VariantId};
use ferro_resolve::resolve::{
    classify, decide_variant_type, resolve_local, LocalOutcome, NavigationTarget,
    VariantTypeDecision,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

/// Chromosome tokens in the spellings users type
fn chrom() -> impl Strategy<Value = String> {
    let name = prop_oneof![
        (1..=22u8).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("y".to_string()),
        Just("M".to_string()),
        Just("mt".to_string()),
    ];
    (prop_oneof![Just(""), Just("chr"), Just("CHR")], name)
        .prop_map(|(prefix, name)| format!("{}{}", prefix, name))
}

fn allele() -> impl Strategy<Value = String> {
    "[ACGTacgt]{1,6}"
}

fn position() -> impl Strategy<Value = u64> {
    1..250_000_000u64
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("-"), Just(":")]
}

fn variant_query() -> impl Strategy<Value = String> {
    (
        chrom(),
        separator(),
        position(),
        separator(),
        allele(),
        prop_oneof![Just("-"), Just(":"), Just(">")],
        allele(),
    )
        .prop_map(|(c, s1, p, s2, r, s3, a)| format!("{c}{s1}{p}{s2}{r}{s3}{a}"))
}

fn short_dataset() -> impl Strategy<Value = DatasetContext> {
    prop_oneof![
        Just("gnomad_r4"),
        Just("gnomad_r3"),
        Just("gnomad_r2_1"),
        Just("exac")
    ]
    .prop_map(DatasetContext::new)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // -------------------------------------------------------------------------
    // Normalization
    // -------------------------------------------------------------------------

    /// Normalizing an already normalized variant changes nothing
    #[test]
    fn test_variant_normalization_idempotent(query in variant_query()) {
        let first: VariantId = query.parse().unwrap();
        let second: VariantId = first.as_str().parse().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Canonical variant ids carry no prefix, uppercase alleles, and `M` for mito
    #[test]
    fn test_variant_canonical_form(query in variant_query()) {
        let variant: VariantId = query.parse().unwrap();
        prop_assert!(!variant.chrom().starts_with("CHR"));
        prop_assert_ne!(variant.chrom(), "MT");
        prop_assert_eq!(variant.ref_allele().to_uppercase(), variant.ref_allele());
        prop_assert_eq!(variant.as_str().split('-').count(), 4);
    }

    /// Regions are always ordered, whichever bound comes first
    #[test]
    fn test_region_bounds_ordered(c in chrom(), a in position(), b in position()) {
        let region: RegionId = format!("{c}-{a}-{b}").parse().unwrap();
        prop_assert!(region.start() <= region.stop());
        prop_assert_eq!(region.start(), a.min(b));
        let reparsed: RegionId = region.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, region);
    }

    // -------------------------------------------------------------------------
    // Classification and candidates
    // -------------------------------------------------------------------------

    /// Every generated variant query classifies as a variant in short datasets
    #[test]
    fn test_variant_queries_classify_as_variants(query in variant_query(), ctx in short_dataset()) {
        let id = classify(&query, &ctx).unwrap();
        prop_assert_eq!(id.kind(), IdentifierKind::Variant);
    }

    /// A bare position yields the window first and the exact base second
    #[test]
    fn test_bare_position_window(c in chrom(), p in position(), radius in 0..1000u64) {
        let ctx = DatasetContext::new("gnomad_r4");
        let outcome = resolve_local(&format!("{c}:{p}"), &ctx, radius);
        let LocalOutcome::Candidates(candidates) = outcome else {
            return Err(TestCaseError::fail("expected candidates"));
        };
        prop_assert_eq!(candidates.len(), 2);

        let window: RegionId = candidates[0].label.parse().unwrap();
        let exact: RegionId = candidates[1].label.parse().unwrap();
        prop_assert_eq!(window.start(), p.saturating_sub(radius).max(1));
        prop_assert_eq!(window.stop(), p + radius);
        prop_assert_eq!(exact.start(), p);
        prop_assert_eq!(exact.stop(), p);
    }

    /// Two variants joined by `and` classify as a co-occurrence pair
    #[test]
    fn test_cooccurrence(a in variant_query(), b in variant_query(), and in "(and|AND|And)") {
        let ctx = DatasetContext::new("gnomad_r2_1");
        let id = classify(&format!("{a} {and} {b}"), &ctx).unwrap();
        match id {
            Identifier::Cooccurrence(pair) => {
                prop_assert_eq!(pair.first, a.parse::<VariantId>().unwrap());
                prop_assert_eq!(pair.second, b.parse::<VariantId>().unwrap());
            }
            other => return Err(TestCaseError::fail(format!("got {other:?}"))),
        }
    }

    /// Rendered targets parse back to the same target
    #[test]
    fn test_target_round_trip(query in variant_query(), dataset in "[a-z0-9_]{1,20}") {
        let ctx = DatasetContext::new(dataset.as_str());
        let variant: VariantId = query.parse().unwrap();
        let target = NavigationTarget::variant(variant.as_str(), &ctx);
        let parsed: NavigationTarget = target.to_string().parse().unwrap();
        prop_assert_eq!(parsed.dataset(), Some(dataset.as_str()));
        prop_assert_eq!(parsed, target);
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Structural datasets never consult the short-variant rules
    #[test]
    fn test_structural_bypass(query in variant_query()) {
        let ctx = DatasetContext::new("gnomad_sv_r4");
        let kind = classify(&query, &ctx).map(|id| id.kind());
        prop_assert!(kind.is_none(), "{:?}", kind);

        let variant: VariantId = query.parse().unwrap();
        prop_assert_eq!(decide_variant_type(&variant, &ctx), VariantTypeDecision::Structural);
    }

    /// Dispatch follows allele lengths and the mitochondrial contig
    #[test]
    fn test_dispatch_rules(query in variant_query()) {
        let ctx = DatasetContext::new("gnomad_r4");
        let variant: VariantId = query.parse().unwrap();
        let decision = decide_variant_type(&variant, &ctx);

        let (r, a) = (variant.ref_allele().len(), variant.alt_allele().len());
        let expected = if r == a && r > 1 {
            VariantTypeDecision::MultiNucleotide
        } else if variant.chrom() == "M" {
            VariantTypeDecision::Mitochondrial
        } else {
            VariantTypeDecision::Standard
        };
        prop_assert_eq!(decision, expected);
    }
}
