//! The ordered classification table.
//!
//! Rules are tried top to bottom and the first match wins. Structural datasets
//! skip the short-variant family entirely: a string with a variant or region
//! shape (`1-100-A-T`, `X-100-A-T`, `chr1:55039447`) is only ever tested against
//! the structural shape there. Other queries still reach the
//! dataset-independent gene and transcript rules.

use std::fmt;
use tracing::debug;

use crate::dataset::DatasetContext;
use crate::identifiers::{grammar, normalize, Identifier, IdentifierKind};

/// Which datasets a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Structural-variant datasets only.
    Structural,
    /// Short-variant datasets only.
    ShortVariant,
    /// Every dataset.
    Any,
}

impl Scope {
    pub fn applies_to(&self, ctx: &DatasetContext) -> bool {
        match self {
            Scope::Structural => ctx.is_structural(),
            Scope::ShortVariant => !ctx.is_structural(),
            Scope::Any => true,
        }
    }
}

/// One entry in the classification cascade.
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: IdentifierKind,
    pub scope: Scope,
    pub extract: fn(&str, &DatasetContext) -> Option<Identifier>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Classification rules in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        kind: IdentifierKind::StructuralVariant,
        scope: Scope::Structural,
        extract: extract_structural,
    },
    Rule {
        kind: IdentifierKind::Variant,
        scope: Scope::ShortVariant,
        extract: extract_variant,
    },
    Rule {
        kind: IdentifierKind::RsId,
        scope: Scope::ShortVariant,
        extract: extract_rsid,
    },
    Rule {
        kind: IdentifierKind::Caid,
        scope: Scope::ShortVariant,
        extract: extract_caid,
    },
    Rule {
        kind: IdentifierKind::ClinVarId,
        scope: Scope::ShortVariant,
        extract: extract_clinvar_id,
    },
    Rule {
        kind: IdentifierKind::Region,
        scope: Scope::ShortVariant,
        extract: extract_region,
    },
    Rule {
        kind: IdentifierKind::EnsemblGene,
        scope: Scope::Any,
        extract: extract_ensembl_gene,
    },
    Rule {
        kind: IdentifierKind::EnsemblTranscript,
        scope: Scope::Any,
        extract: extract_ensembl_transcript,
    },
    Rule {
        kind: IdentifierKind::GeneSymbol,
        scope: Scope::Any,
        extract: extract_gene_symbol,
    },
    Rule {
        kind: IdentifierKind::Cooccurrence,
        scope: Scope::ShortVariant,
        extract: extract_cooccurrence,
    },
];

/// Classify a query against the rule table.
///
/// Returns `None` when no rule matches; that is the "no match" outcome, not
/// an error.
///
/// # Examples
///
/// ```
/// use ferro_resolve::dataset::DatasetContext;
/// use ferro_resolve::identifiers::IdentifierKind;
/// use ferro_resolve::resolve::rules::classify;
///
/// let ctx = DatasetContext::new("gnomad_r4");
/// let id = classify("rs6025", &ctx).unwrap();
/// assert_eq!(id.kind(), IdentifierKind::RsId);
/// assert!(classify("not a query", &ctx).is_none());
/// ```
pub fn classify(query: &str, ctx: &DatasetContext) -> Option<Identifier> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    RULES
        .iter()
        .filter(|rule| rule.scope.applies_to(ctx))
        .find_map(|rule| {
            let identifier = (rule.extract)(query, ctx)?;
            debug!(kind = %rule.kind, query, "classified query");
            Some(identifier)
        })
}

fn extract_structural(query: &str, ctx: &DatasetContext) -> Option<Identifier> {
    let naming = ctx.structural?;
    grammar::match_structural(query, naming)
        .map(normalize::normalize_structural)
        .map(Identifier::StructuralVariant)
}

fn extract_variant(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    grammar::match_variant(query)
        .map(normalize::normalize_variant)
        .map(Identifier::Variant)
}

fn extract_rsid(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    grammar::match_rsid(query)
        .map(normalize::normalize_rsid)
        .map(Identifier::External)
}

fn extract_caid(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    grammar::match_caid(query)
        .map(normalize::normalize_caid)
        .map(Identifier::External)
}

fn extract_clinvar_id(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    grammar::match_clinvar_id(query)
        .map(normalize::normalize_clinvar_id)
        .map(Identifier::External)
}

fn extract_region(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    let normalized = normalize::normalize_region(grammar::match_region(query)?);
    Some(Identifier::Region {
        region: normalized.region,
        bare_position: normalized.bare_position,
    })
}

fn extract_ensembl_gene(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    grammar::match_ensembl_gene(query)
        .map(normalize::normalize_ensembl_gene)
        .map(Identifier::External)
}

fn extract_ensembl_transcript(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    grammar::match_ensembl_transcript(query)
        .map(normalize::normalize_ensembl_transcript)
        .map(Identifier::External)
}

fn extract_gene_symbol(query: &str, ctx: &DatasetContext) -> Option<Identifier> {
    // Letter-led variants and regions also have the gene-symbol shape
    if ctx.is_structural() && (grammar::is_variant(query) || grammar::is_region(query)) {
        return None;
    }
    grammar::match_gene_symbol(query)
        .map(normalize::normalize_gene_symbol)
        .map(Identifier::GeneSymbol)
}

fn extract_cooccurrence(query: &str, _ctx: &DatasetContext) -> Option<Identifier> {
    let (first, second) = grammar::match_cooccurrence(query)?;
    Some(Identifier::Cooccurrence(normalize::normalize_cooccurrence(
        first, second,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> DatasetContext {
        DatasetContext::new("gnomad_r4")
    }

    fn structural() -> DatasetContext {
        DatasetContext::new("gnomad_sv_r2_1")
    }

    #[test]
    fn test_rule_order_is_stable() {
        let kinds: Vec<_> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IdentifierKind::StructuralVariant,
                IdentifierKind::Variant,
                IdentifierKind::RsId,
                IdentifierKind::Caid,
                IdentifierKind::ClinVarId,
                IdentifierKind::Region,
                IdentifierKind::EnsemblGene,
                IdentifierKind::EnsemblTranscript,
                IdentifierKind::GeneSymbol,
                IdentifierKind::Cooccurrence,
            ]
        );
    }

    #[test]
    fn test_region_beats_gene_symbol() {
        // "MT-8602" is also a valid gene-symbol shape
        let id = classify("MT-8602", &short()).unwrap();
        assert_eq!(id.kind(), IdentifierKind::Region);
    }

    #[test]
    fn test_caid_beats_gene_symbol() {
        let id = classify("CA12345", &short()).unwrap();
        assert_eq!(id.kind(), IdentifierKind::Caid);
    }

    #[test]
    fn test_malformed_ensembl_falls_to_gene_symbol() {
        let id = classify("ENSG0000016917", &short()).unwrap();
        assert_eq!(id.kind(), IdentifierKind::GeneSymbol);
    }

    #[test]
    fn test_structural_dataset_skips_short_variant_rules() {
        assert!(classify("1-55516888-G-GA", &structural()).is_none());
        assert!(classify("1:55039447", &structural()).is_none());
        assert!(classify("12345", &structural()).is_none());

        let id = classify("MCNV_4_185", &structural()).unwrap();
        assert_eq!(id.kind(), IdentifierKind::StructuralVariant);
    }

    #[test]
    fn test_structural_dataset_ignores_letter_led_variants() {
        for query in ["X-100-A-T", "chr1-55516888-G-GA", "MT-8602-T-C", "chrX:100", "MT-8602"] {
            assert!(classify(query, &structural()).is_none(), "{}", query);
        }
        // Mitochondrial gene symbols are not region-shaped
        let id = classify("MT-ND1", &structural()).unwrap();
        assert_eq!(id.kind(), IdentifierKind::GeneSymbol);
    }

    #[test]
    fn test_structural_shape_ignored_for_short_dataset() {
        // Underscores are not part of the gene-symbol shape
        assert!(classify("MCNV_4_185", &short()).is_none());
    }

    #[test]
    fn test_structural_dataset_still_resolves_genes() {
        let id = classify("ENSG00000169174", &structural()).unwrap();
        assert_eq!(id.kind(), IdentifierKind::EnsemblGene);
        let id = classify("pcsk9", &structural()).unwrap();
        assert_eq!(id, Identifier::GeneSymbol("PCSK9".to_string()));
    }

    #[test]
    fn test_whitespace_and_empty() {
        assert!(classify("", &short()).is_none());
        assert!(classify("   ", &short()).is_none());
        let id = classify("  rs6025\n", &short()).unwrap();
        assert_eq!(id.to_string(), "rs6025");
    }
}
