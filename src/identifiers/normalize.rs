//! Canonicalization of grammar matches.
//!
//! Every function here is total over the output of the matching grammar
//! extractor and idempotent: normalizing the rendered form of a normalized
//! identifier yields the same identifier.

use super::grammar::{RegionParts, VariantParts};
use super::types::{
    CooccurrencePair, ExternalId, RegionId, StructuralVariantId, VariantId,
};

/// A normalized region and whether the query named a single base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRegion {
    pub region: RegionId,
    pub bare_position: bool,
}

/// Uppercase the chromosome, drop any `chr` prefix, and map `MT` to `M`.
///
/// ```
/// use ferro_resolve::identifiers::normalize::normalize_chrom;
///
/// assert_eq!(normalize_chrom("chrmt"), "M");
/// assert_eq!(normalize_chrom("x"), "X");
/// assert_eq!(normalize_chrom("17"), "17");
/// ```
pub fn normalize_chrom(chrom: &str) -> String {
    let upper = chrom.to_uppercase();
    let bare = upper.strip_prefix("CHR").unwrap_or(&upper);
    if bare == "MT" {
        "M".to_string()
    } else {
        bare.to_string()
    }
}

pub fn normalize_variant(parts: VariantParts<'_>) -> VariantId {
    VariantId::from_canonical_parts(
        normalize_chrom(parts.chrom),
        parts.pos,
        parts.ref_allele.to_uppercase(),
        parts.alt_allele.to_uppercase(),
    )
}

pub fn normalize_region(parts: RegionParts<'_>) -> NormalizedRegion {
    let chrom = normalize_chrom(parts.chrom);
    match parts.stop {
        Some(stop) => NormalizedRegion {
            region: RegionId::ordered(chrom, parts.start, stop),
            bare_position: false,
        },
        None => NormalizedRegion {
            region: RegionId::ordered(chrom, parts.start, parts.start),
            bare_position: true,
        },
    }
}

/// rsIDs keep the conventional lowercase `rs` prefix.
pub fn normalize_rsid(token: &str) -> ExternalId {
    ExternalId::RsId(format!("rs{}", &token[2..]))
}

pub fn normalize_caid(token: &str) -> ExternalId {
    ExternalId::Caid(token.to_uppercase())
}

pub fn normalize_clinvar_id(token: &str) -> ExternalId {
    ExternalId::ClinVar(token.to_string())
}

pub fn normalize_ensembl_gene(token: &str) -> ExternalId {
    ExternalId::EnsemblGene(token.to_uppercase())
}

pub fn normalize_ensembl_transcript(token: &str) -> ExternalId {
    ExternalId::EnsemblTranscript(token.to_uppercase())
}

pub fn normalize_structural(token: &str) -> StructuralVariantId {
    StructuralVariantId::new(token.to_uppercase())
}

pub fn normalize_gene_symbol(token: &str) -> String {
    token.to_uppercase()
}

pub fn normalize_cooccurrence(first: VariantParts<'_>, second: VariantParts<'_>) -> CooccurrencePair {
    CooccurrencePair {
        first: normalize_variant(first),
        second: normalize_variant(second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::grammar;

    #[test]
    fn test_normalize_variant_case_and_mito() {
        let parts = grammar::match_variant("chrmt-8602-t-c").unwrap();
        let v = normalize_variant(parts);
        assert_eq!(v.as_str(), "M-8602-T-C");
        assert_eq!(v.chrom(), "M");
    }

    #[test]
    fn test_normalize_variant_separators() {
        let parts = grammar::match_variant("x:123:a>g").unwrap();
        assert_eq!(normalize_variant(parts).as_str(), "X-123-A-G");
    }

    #[test]
    fn test_normalize_variant_idempotent() {
        let once = normalize_variant(grammar::match_variant("chr7:140753336:a:t").unwrap());
        let twice = normalize_variant(grammar::match_variant(once.as_str()).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_region_reorders() {
        let parts = grammar::match_region("2:500-100").unwrap();
        let normalized = normalize_region(parts);
        assert_eq!(normalized.region.to_string(), "2-100-500");
        assert!(!normalized.bare_position);
    }

    #[test]
    fn test_normalize_region_bare_position() {
        let parts = grammar::match_region("chr1:55039447").unwrap();
        let normalized = normalize_region(parts);
        assert_eq!(normalized.region.to_string(), "1-55039447-55039447");
        assert!(normalized.bare_position);
    }

    #[test]
    fn test_normalize_external_ids() {
        assert_eq!(normalize_rsid("RS6025").as_str(), "rs6025");
        assert_eq!(normalize_caid("ca321").as_str(), "CA321");
        assert_eq!(
            normalize_ensembl_gene("ensg00000169174").as_str(),
            "ENSG00000169174"
        );
        assert_eq!(
            normalize_ensembl_transcript("enst00000302118").as_str(),
            "ENST00000302118"
        );
        assert_eq!(normalize_clinvar_id("12345").as_str(), "12345");
    }

    #[test]
    fn test_normalize_structural() {
        assert_eq!(normalize_structural("mcnv_4_185").as_str(), "MCNV_4_185");
    }

    #[test]
    fn test_normalize_cooccurrence() {
        let (a, b) = grammar::match_cooccurrence("1-100-a-t AND chr1:200:g:c").unwrap();
        let pair = normalize_cooccurrence(a, b);
        assert_eq!(pair.first.as_str(), "1-100-A-T");
        assert_eq!(pair.second.as_str(), "1-200-G-C");
    }
}
