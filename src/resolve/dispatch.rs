//! Variant type dispatch.
//!
//! Picks the specialized view for a normalized variant. Recomputed on every
//! navigation; nothing is cached.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dataset::DatasetContext;
use crate::identifiers::VariantId;

/// Which specialized view a variant routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantTypeDecision {
    Standard,
    MultiNucleotide,
    Mitochondrial,
    Structural,
}

impl VariantTypeDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantTypeDecision::Standard => "standard",
            VariantTypeDecision::MultiNucleotide => "multi_nucleotide",
            VariantTypeDecision::Mitochondrial => "mitochondrial",
            VariantTypeDecision::Structural => "structural",
        }
    }
}

impl fmt::Display for VariantTypeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decide the view for a variant in a dataset.
///
/// Rules, in order: structural datasets always route to the structural view;
/// equal-length alleles longer than one base are multi-nucleotide; the `M`
/// contig is mitochondrial; everything else is standard.
///
/// # Examples
///
/// ```
/// use ferro_resolve::dataset::DatasetContext;
/// use ferro_resolve::identifiers::VariantId;
/// use ferro_resolve::resolve::{decide_variant_type, VariantTypeDecision};
///
/// let ctx = DatasetContext::new("gnomad_r4");
/// let mnv: VariantId = "1-1000-AT-GC".parse().unwrap();
/// assert_eq!(decide_variant_type(&mnv, &ctx), VariantTypeDecision::MultiNucleotide);
/// ```
pub fn decide_variant_type(variant: &VariantId, ctx: &DatasetContext) -> VariantTypeDecision {
    if ctx.is_structural() {
        return VariantTypeDecision::Structural;
    }
    let ref_len = variant.ref_allele().len();
    if ref_len == variant.alt_allele().len() && ref_len > 1 {
        VariantTypeDecision::MultiNucleotide
    } else if variant.chrom() == "M" {
        VariantTypeDecision::Mitochondrial
    } else {
        VariantTypeDecision::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(id: &str, dataset: &str) -> VariantTypeDecision {
        let variant: VariantId = id.parse().unwrap();
        decide_variant_type(&variant, &DatasetContext::new(dataset))
    }

    #[test]
    fn test_standard_indel() {
        assert_eq!(
            decide("1-55516888-G-GA", "gnomad_r4"),
            VariantTypeDecision::Standard
        );
        assert_eq!(
            decide("1-55051215-GA-G", "gnomad_r4"),
            VariantTypeDecision::Standard
        );
    }

    #[test]
    fn test_snv_is_standard() {
        assert_eq!(decide("1-100-A-T", "gnomad_r4"), VariantTypeDecision::Standard);
    }

    #[test]
    fn test_mnv() {
        assert_eq!(
            decide("1-1000-AT-GC", "gnomad_r4"),
            VariantTypeDecision::MultiNucleotide
        );
    }

    #[test]
    fn test_mitochondrial() {
        assert_eq!(
            decide("M-8602-T-C", "gnomad_r4"),
            VariantTypeDecision::Mitochondrial
        );
        assert_eq!(
            decide("chrMT-8602-T-C", "gnomad_r3"),
            VariantTypeDecision::Mitochondrial
        );
    }

    #[test]
    fn test_mnv_takes_precedence_over_mitochondrial() {
        assert_eq!(
            decide("M-8602-TA-CG", "gnomad_r4"),
            VariantTypeDecision::MultiNucleotide
        );
    }

    #[test]
    fn test_structural_dataset_overrides_shape() {
        assert_eq!(
            decide("1-1000-AT-GC", "gnomad_sv_r4"),
            VariantTypeDecision::Structural
        );
    }

    #[test]
    fn test_decision_is_deterministic() {
        let variant: VariantId = "M-8602-T-C".parse().unwrap();
        let ctx = DatasetContext::new("gnomad_r4");
        assert_eq!(
            decide_variant_type(&variant, &ctx),
            decide_variant_type(&variant, &ctx)
        );
    }
}
