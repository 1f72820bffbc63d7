//! In-memory lookup for tests and offline use.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{GeneMatch, GeneSearch, VariantSearch};
use crate::dataset::{DatasetContext, ReferenceGenome};
use crate::error::ResolveError;
use crate::identifiers::ExternalId;

/// Mock implementation of both lookup traits.
///
/// Gene search is a case-insensitive prefix match on the symbol, returned in
/// symbol order. Variant search is an exact match on the normalized external
/// identifier.
///
/// # Example
///
/// ```
/// use ferro_resolve::lookup::MockLookup;
///
/// let mut lookup = MockLookup::new();
/// lookup.add_variant("rs6025", "1-169519049-T-C");
/// assert_eq!(lookup.variant_calls(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockLookup {
    genes: HashMap<ReferenceGenome, Vec<GeneMatch>>,
    variants: HashMap<String, Vec<String>>,
    unavailable: Option<String>,
    gene_calls: AtomicUsize,
    variant_calls: AtomicUsize,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup whose every call fails with `SearchUnavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn add_gene(
        &mut self,
        symbol: impl Into<String>,
        ensembl_id: impl Into<String>,
        genome: ReferenceGenome,
    ) {
        self.genes
            .entry(genome)
            .or_default()
            .push(GeneMatch::new(symbol, ensembl_id));
    }

    /// Register a variant id returned for an external identifier.
    ///
    /// Calling this repeatedly with the same identifier makes it ambiguous.
    pub fn add_variant(&mut self, external_id: impl Into<String>, variant_id: impl Into<String>) {
        self.variants
            .entry(external_id.into().to_uppercase())
            .or_default()
            .push(variant_id.into());
    }

    /// Number of gene searches issued so far.
    pub fn gene_calls(&self) -> usize {
        self.gene_calls.load(Ordering::SeqCst)
    }

    /// Number of variant searches issued so far.
    pub fn variant_calls(&self) -> usize {
        self.variant_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), ResolveError> {
        match &self.unavailable {
            Some(reason) => Err(ResolveError::search_unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GeneSearch for MockLookup {
    async fn search_genes(
        &self,
        query: &str,
        genome: ReferenceGenome,
    ) -> Result<Vec<GeneMatch>, ResolveError> {
        self.gene_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let prefix = query.to_uppercase();
        let mut matches: Vec<GeneMatch> = self
            .genes
            .get(&genome)
            .map(|genes| {
                genes
                    .iter()
                    .filter(|g| g.symbol.to_uppercase().starts_with(&prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        matches.sort_by(|a, b| {
            a.symbol
                .cmp(&b.symbol)
                .then_with(|| a.ensembl_id.cmp(&b.ensembl_id))
        });
        Ok(matches)
    }
}

#[async_trait]
impl VariantSearch for MockLookup {
    async fn search_variants(
        &self,
        query: &ExternalId,
        _dataset: &DatasetContext,
    ) -> Result<Vec<String>, ResolveError> {
        self.variant_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .variants
            .get(&query.as_str().to_uppercase())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn lookup() -> MockLookup {
        let mut lookup = MockLookup::new();
        lookup.add_gene("PCSK9", "ENSG00000169174", ReferenceGenome::GRCh38);
        lookup.add_gene("PCSK1", "ENSG00000175426", ReferenceGenome::GRCh38);
        lookup.add_gene("PCSK9", "ENSG00000169174", ReferenceGenome::GRCh37);
        lookup.add_variant("rs6025", "1-169519049-T-C");
        lookup
    }

    #[tokio::test]
    async fn test_gene_prefix_search_sorted() {
        let genes = lookup()
            .search_genes("pcsk", ReferenceGenome::GRCh38)
            .await
            .unwrap();
        let symbols: Vec<_> = genes.iter().map(|g| g.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["PCSK1", "PCSK9"]);
    }

    #[tokio::test]
    async fn test_gene_search_scoped_to_genome() {
        let genes = lookup()
            .search_genes("PCSK1", ReferenceGenome::GRCh37)
            .await
            .unwrap();
        assert!(genes.is_empty());
    }

    #[tokio::test]
    async fn test_variant_search() {
        let lookup = lookup();
        let ctx = DatasetContext::new("gnomad_r4");
        let ids = lookup
            .search_variants(&ExternalId::RsId("rs6025".to_string()), &ctx)
            .await
            .unwrap();
        assert_eq!(ids, vec!["1-169519049-T-C"]);

        let ids = lookup
            .search_variants(&ExternalId::RsId("rs1".to_string()), &ctx)
            .await
            .unwrap();
        assert!(ids.is_empty());
        assert_eq!(lookup.variant_calls(), 2);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let lookup = MockLookup::unavailable("connection refused");
        let err = lookup
            .search_genes("PCSK9", ReferenceGenome::GRCh38)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SearchUnavailable);
        assert_eq!(lookup.gene_calls(), 1);
    }
}
