//! The resolution orchestrator.
//!
//! Composes the local cascade with the remote lookups. [`Resolver::search`]
//! serves the free-text search box and returns an ordered candidate list;
//! [`Resolver::navigate`] serves URLs that already carry an identifier and
//! dispatches to exactly one view, or returns a disambiguation list.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::dataset::DatasetContext;
use crate::error::{ErrorCode, ResolveError};
use crate::identifiers::{grammar, normalize, ExternalId, StructuralVariantId, VariantId};
use crate::lookup::{GeneSearch, GraphQlClient, VariantSearch};

use super::candidate::{NavigationCandidate, NavigationTarget};
use super::dispatch::{decide_variant_type, VariantTypeDecision};
use super::local::{resolve_local, variant_candidate, LocalOutcome, DEFAULT_WINDOW_RADIUS};
use super::remote::{label_gene_matches, parse_remote_variant_ids};

/// Outcome of direct navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// A short variant routed to its specialized view.
    Variant {
        variant: VariantId,
        decision: VariantTypeDecision,
        target: NavigationTarget,
    },
    /// A structural variant in a structural dataset.
    StructuralVariant {
        variant: StructuralVariantId,
        decision: VariantTypeDecision,
        target: NavigationTarget,
    },
    /// An external identifier that expanded to several variants.
    Ambiguous {
        query: String,
        candidates: Vec<NavigationCandidate>,
    },
    /// An external identifier the search service does not know.
    NotFound { query: String },
}

impl Route {
    /// The navigation target when the route is unambiguous.
    pub fn target(&self) -> Option<&NavigationTarget> {
        match self {
            Route::Variant { target, .. } | Route::StructuralVariant { target, .. } => {
                Some(target)
            }
            Route::Ambiguous { .. } | Route::NotFound { .. } => None,
        }
    }

    pub fn decision(&self) -> Option<VariantTypeDecision> {
        match self {
            Route::Variant { decision, .. } | Route::StructuralVariant { decision, .. } => {
                Some(*decision)
            }
            Route::Ambiguous { .. } | Route::NotFound { .. } => None,
        }
    }

    /// Code reported alongside a disambiguation list.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Route::Ambiguous { .. } => Some(ErrorCode::AmbiguousDirectNavigation),
            _ => None,
        }
    }
}

/// Resolves queries against a dataset using local rules and remote lookups.
#[derive(Clone)]
pub struct Resolver {
    genes: Arc<dyn GeneSearch>,
    variants: Arc<dyn VariantSearch>,
    window_radius: u64,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("window_radius", &self.window_radius)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(genes: Arc<dyn GeneSearch>, variants: Arc<dyn VariantSearch>) -> Self {
        Self {
            genes,
            variants,
            window_radius: DEFAULT_WINDOW_RADIUS,
        }
    }

    /// Build a resolver that uses one collaborator for both lookups.
    pub fn with_lookup<L>(lookup: Arc<L>) -> Self
    where
        L: GeneSearch + VariantSearch + 'static,
    {
        Self::new(lookup.clone(), lookup)
    }

    /// Build a resolver backed by the GraphQL client described in `config`.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let client = Arc::new(GraphQlClient::new(&config.remote)?);
        Ok(Self::with_lookup(client).with_window_radius(config.resolver.window_radius))
    }

    pub fn with_window_radius(mut self, radius: u64) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn window_radius(&self) -> u64 {
        self.window_radius
    }

    /// Local-only resolution.
    pub fn resolve_local(&self, query: &str, ctx: &DatasetContext) -> LocalOutcome {
        resolve_local(query, ctx, self.window_radius)
    }

    /// Search mode.
    ///
    /// Returns the ordered candidate list, possibly empty. A gene-symbol query
    /// costs exactly one remote call; a failure of that call is returned as
    /// `SearchUnavailable` rather than an empty list.
    pub async fn search(
        &self,
        query: &str,
        ctx: &DatasetContext,
    ) -> Result<Vec<NavigationCandidate>, ResolveError> {
        match self.resolve_local(query, ctx) {
            LocalOutcome::Candidates(candidates) => Ok(candidates),
            LocalOutcome::NoMatch => {
                debug!(query, dataset = %ctx, "no rule matched");
                Ok(Vec::new())
            }
            LocalOutcome::GeneSymbol(symbol) => {
                let genes = self
                    .genes
                    .search_genes(&symbol, ctx.reference_genome)
                    .await
                    .map_err(|e| {
                        warn!(query = %symbol, error = %e, "gene search failed");
                        e
                    })?;
                info!(query = %symbol, matches = genes.len(), "gene search complete");
                label_gene_matches(&genes, ctx)
            }
        }
    }

    /// Direct-navigation mode for a URL path segment.
    ///
    /// Structural datasets accept only the structural shape. Otherwise a
    /// variant shape is dispatched locally, and an rsID, CAID or ClinVar id is
    /// expanded through the variant search.
    pub async fn navigate(&self, segment: &str, ctx: &DatasetContext) -> Result<Route, ResolveError> {
        let segment = segment.trim();

        if let Some(naming) = ctx.structural {
            let parts = grammar::match_structural(segment, naming).ok_or_else(|| {
                ResolveError::InvalidDirectIdentifier {
                    input: segment.to_string(),
                }
            })?;
            let variant = normalize::normalize_structural(parts);
            let target = NavigationTarget::variant(variant.as_str(), ctx);
            return Ok(Route::StructuralVariant {
                variant,
                decision: VariantTypeDecision::Structural,
                target,
            });
        }

        if let Some(parts) = grammar::match_variant(segment) {
            return Ok(self.variant_route(normalize::normalize_variant(parts), ctx));
        }

        let external = if let Some(parts) = grammar::match_rsid(segment) {
            normalize::normalize_rsid(parts)
        } else if let Some(parts) = grammar::match_caid(segment) {
            normalize::normalize_caid(parts)
        } else if let Some(parts) = grammar::match_clinvar_id(segment) {
            normalize::normalize_clinvar_id(parts)
        } else {
            return Err(ResolveError::InvalidDirectIdentifier {
                input: segment.to_string(),
            });
        };

        self.navigate_external(external, ctx).await
    }

    async fn navigate_external(
        &self,
        external: ExternalId,
        ctx: &DatasetContext,
    ) -> Result<Route, ResolveError> {
        let ids = self.variants.search_variants(&external, ctx).await?;
        let mut variants = parse_remote_variant_ids(&ids)?;
        info!(query = %external, matches = variants.len(), "variant search complete");

        match variants.len() {
            0 => Ok(Route::NotFound {
                query: external.as_str().to_string(),
            }),
            1 => {
                let variant = variants.remove(0);
                Ok(self.variant_route(variant, ctx))
            }
            _ => Ok(Route::Ambiguous {
                query: external.as_str().to_string(),
                candidates: variants
                    .iter()
                    .map(|variant| variant_candidate(variant, ctx))
                    .collect(),
            }),
        }
    }

    fn variant_route(&self, variant: VariantId, ctx: &DatasetContext) -> Route {
        let decision = decide_variant_type(&variant, ctx);
        debug!(variant = %variant, decision = %decision, "dispatched variant");
        let target = NavigationTarget::variant(variant.as_str(), ctx);
        Route::Variant {
            variant,
            decision,
            target,
        }
    }
}
