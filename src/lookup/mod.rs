//! Remote lookup collaborators.
//!
//! Two external calls sit at the edge of resolution:
//! - gene-symbol search, scoped to a reference genome build
//! - variant search, which expands an rsID, CAID, or ClinVar id into concrete
//!   variant ids for direct navigation
//!
//! Both are traits so the resolver can be driven by the GraphQL client in
//! production and by [`MockLookup`] in tests.
//!
//! # Example
//!
//! ```
//! use ferro_resolve::dataset::ReferenceGenome;
//! use ferro_resolve::lookup::{GeneSearch, MockLookup};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut lookup = MockLookup::new();
//! lookup.add_gene("PCSK9", "ENSG00000169174", ReferenceGenome::GRCh38);
//!
//! let genes = lookup.search_genes("PCSK9", ReferenceGenome::GRCh38).await.unwrap();
//! assert_eq!(genes.len(), 1);
//! # }
//! ```

mod graphql;
mod mock;

pub use graphql::{parse_gene_search_response, parse_variant_search_response, GraphQlClient};
pub use mock::MockLookup;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetContext, ReferenceGenome};
use crate::error::ResolveError;
use crate::identifiers::ExternalId;

/// One gene returned by the remote search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneMatch {
    pub ensembl_id: String,
    pub symbol: String,
}

impl GeneMatch {
    pub fn new(symbol: impl Into<String>, ensembl_id: impl Into<String>) -> Self {
        Self {
            ensembl_id: ensembl_id.into(),
            symbol: symbol.into(),
        }
    }
}

/// Remote gene-symbol search.
///
/// Implementations must return `Err(ResolveError::SearchUnavailable)` when the
/// call fails or the payload lacks the expected field, and `Ok(vec![])` only
/// when the service genuinely found nothing.
#[async_trait]
pub trait GeneSearch: Send + Sync {
    async fn search_genes(
        &self,
        query: &str,
        genome: ReferenceGenome,
    ) -> Result<Vec<GeneMatch>, ResolveError>;
}

/// Remote variant search, returning raw variant ids for an external identifier.
#[async_trait]
pub trait VariantSearch: Send + Sync {
    async fn search_variants(
        &self,
        query: &ExternalId,
        dataset: &DatasetContext,
    ) -> Result<Vec<String>, ResolveError>;
}
