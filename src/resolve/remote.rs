//! Adapters from remote lookup results to candidates.

use std::collections::HashMap;

use crate::dataset::DatasetContext;
use crate::error::ResolveError;
use crate::identifiers::{grammar, normalize, VariantId};
use crate::lookup::GeneMatch;

use super::candidate::{NavigationCandidate, NavigationTarget};

/// Build gene-page candidates from remote matches, preserving their order.
///
/// A symbol shared by several matches is labeled `SYMBOL (ENSEMBL_ID)` so the
/// entries can be told apart; unique symbols are labeled by symbol alone. A
/// match whose Ensembl id does not have the gene-id shape is reported as a
/// search failure.
///
/// # Examples
///
/// ```
/// use ferro_resolve::dataset::DatasetContext;
/// use ferro_resolve::lookup::GeneMatch;
/// use ferro_resolve::resolve::label_gene_matches;
///
/// let ctx = DatasetContext::new("gnomad_r4");
/// let genes = vec![
///     GeneMatch::new("PCSK9", "ENSG00000169174"),
///     GeneMatch::new("PCSK1", "ENSG00000175426"),
/// ];
/// let candidates = label_gene_matches(&genes, &ctx).unwrap();
/// assert_eq!(candidates[0].label, "PCSK9");
/// assert_eq!(candidates[0].target.to_string(), "/gene/ENSG00000169174?dataset=gnomad_r4");
/// ```
pub fn label_gene_matches(
    genes: &[GeneMatch],
    ctx: &DatasetContext,
) -> Result<Vec<NavigationCandidate>, ResolveError> {
    let mut symbol_counts: HashMap<&str, usize> = HashMap::new();
    for gene in genes {
        *symbol_counts.entry(gene.symbol.as_str()).or_default() += 1;
    }

    genes
        .iter()
        .map(|gene| {
            let ensembl_id = grammar::match_ensembl_gene(gene.ensembl_id.trim())
                .map(normalize::normalize_ensembl_gene)
                .ok_or_else(|| {
                    ResolveError::search_unavailable(format!(
                        "search returned unreadable gene id '{}'",
                        gene.ensembl_id
                    ))
                })?;
            let label = if symbol_counts[gene.symbol.as_str()] > 1 {
                format!("{} ({})", gene.symbol, ensembl_id)
            } else {
                gene.symbol.clone()
            };
            Ok(NavigationCandidate::new(
                label,
                NavigationTarget::gene(ensembl_id.as_str(), ctx),
            ))
        })
        .collect()
}

/// Parse variant ids returned by the remote variant search.
///
/// An id the local grammar cannot read means the payload is not what was
/// expected, which is reported as a search failure.
pub fn parse_remote_variant_ids(ids: &[String]) -> Result<Vec<VariantId>, ResolveError> {
    ids.iter()
        .map(|id| {
            id.parse::<VariantId>().map_err(|_| {
                ResolveError::search_unavailable(format!(
                    "search returned unreadable variant id '{}'",
                    id
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_unique_symbols_unlabeled() {
        let ctx = DatasetContext::new("gnomad_r4");
        let genes = vec![GeneMatch::new("PCSK9", "ENSG00000169174")];
        let candidates = label_gene_matches(&genes, &ctx).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, "PCSK9");
    }

    #[test]
    fn test_shared_symbols_labeled_with_ids() {
        let ctx = DatasetContext::new("gnomad_r4");
        let genes = vec![
            GeneMatch::new("ABC", "ENSG00000000001"),
            GeneMatch::new("ABCD", "ENSG00000000003"),
            GeneMatch::new("ABC", "ENSG00000000002"),
        ];
        let labels: Vec<_> = label_gene_matches(&genes, &ctx)
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(
            labels,
            vec!["ABC (ENSG00000000001)", "ABCD", "ABC (ENSG00000000002)"]
        );
    }

    #[test]
    fn test_empty_matches() {
        let ctx = DatasetContext::new("gnomad_r4");
        assert!(label_gene_matches(&[], &ctx).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_gene_id_is_search_failure() {
        let ctx = DatasetContext::new("gnomad_r4");
        let genes = vec![
            GeneMatch::new("PCSK9", "ENSG00000169174"),
            GeneMatch::new("ABC", "ENSG1?x=1"),
        ];
        let err = label_gene_matches(&genes, &ctx).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SearchUnavailable);
        assert!(err.to_string().contains("ENSG1?x=1"));
    }

    #[test]
    fn test_gene_targets_round_trip() {
        let ctx = DatasetContext::new("gnomad_r4");
        let genes = vec![GeneMatch::new("PCSK9", "ensg00000169174")];
        let candidates = label_gene_matches(&genes, &ctx).unwrap();
        let target = &candidates[0].target;
        assert_eq!(target.segment(), Some("ENSG00000169174"));
        assert_eq!(&NavigationTarget::parse(&target.to_string()).unwrap(), target);
    }

    #[test]
    fn test_parse_remote_variant_ids() {
        let ids = vec!["1-169519049-T-C".to_string(), "chr1-100-a-g".to_string()];
        let parsed = parse_remote_variant_ids(&ids).unwrap();
        assert_eq!(parsed[0].as_str(), "1-169519049-T-C");
        assert_eq!(parsed[1].as_str(), "1-100-A-G");

        let err = parse_remote_variant_ids(&["garbage".to_string()]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SearchUnavailable);
    }
}
