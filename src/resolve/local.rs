//! Local resolution: classification followed by candidate construction, with
//! no network access.

use crate::dataset::DatasetContext;
use crate::identifiers::{ExternalId, Identifier, RegionId, VariantId};

use super::candidate::{NavigationCandidate, NavigationTarget};
use super::rules::classify;

/// Default half-width, in bases, of the window opened around a bare position.
pub const DEFAULT_WINDOW_RADIUS: u64 = 20;

/// What the local cascade made of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    /// Resolved without any remote call.
    Candidates(Vec<NavigationCandidate>),
    /// Shaped like a gene symbol; needs the remote gene search.
    GeneSymbol(String),
    /// No rule matched.
    NoMatch,
}

/// Run the classification cascade and build candidates for the match.
///
/// # Examples
///
/// ```
/// use ferro_resolve::dataset::DatasetContext;
/// use ferro_resolve::resolve::{resolve_local, LocalOutcome, DEFAULT_WINDOW_RADIUS};
///
/// let ctx = DatasetContext::new("gnomad_r4");
/// let LocalOutcome::Candidates(candidates) = resolve_local("1:55039447", &ctx, DEFAULT_WINDOW_RADIUS) else {
///     panic!("expected candidates");
/// };
/// assert_eq!(candidates[0].label, "1-55039427-55039467");
/// assert_eq!(candidates[1].label, "1-55039447-55039447");
/// ```
pub fn resolve_local(query: &str, ctx: &DatasetContext, window_radius: u64) -> LocalOutcome {
    match classify(query, ctx) {
        None => LocalOutcome::NoMatch,
        Some(Identifier::GeneSymbol(symbol)) => LocalOutcome::GeneSymbol(symbol),
        Some(identifier) => {
            LocalOutcome::Candidates(candidates_for(&identifier, ctx, window_radius))
        }
    }
}

/// Candidates for an already classified identifier. Gene symbols produce none.
pub fn candidates_for(
    identifier: &Identifier,
    ctx: &DatasetContext,
    window_radius: u64,
) -> Vec<NavigationCandidate> {
    match identifier {
        Identifier::StructuralVariant(id) => vec![NavigationCandidate::new(
            id.as_str(),
            NavigationTarget::variant(id.as_str(), ctx),
        )],
        Identifier::Variant(variant) => vec![variant_candidate(variant, ctx)],
        Identifier::External(external) => vec![external_candidate(external, ctx)],
        Identifier::Region {
            region,
            bare_position: true,
        } => {
            let window = RegionId::window(region.chrom(), region.start(), window_radius);
            vec![region_candidate(&window, ctx), region_candidate(region, ctx)]
        }
        Identifier::Region { region, .. } => vec![region_candidate(region, ctx)],
        Identifier::GeneSymbol(_) => Vec::new(),
        Identifier::Cooccurrence(pair) => vec![NavigationCandidate::new(
            format!("{} and {}", pair.first, pair.second),
            NavigationTarget::cooccurrence(pair, ctx),
        )],
    }
}

pub fn variant_candidate(variant: &VariantId, ctx: &DatasetContext) -> NavigationCandidate {
    NavigationCandidate::new(
        variant.as_str(),
        NavigationTarget::variant(variant.as_str(), ctx),
    )
}

fn region_candidate(region: &RegionId, ctx: &DatasetContext) -> NavigationCandidate {
    NavigationCandidate::new(region.to_string(), NavigationTarget::region(region, ctx))
}

fn external_candidate(external: &ExternalId, ctx: &DatasetContext) -> NavigationCandidate {
    let target = match external {
        ExternalId::EnsemblGene(id) => NavigationTarget::gene(id, ctx),
        ExternalId::EnsemblTranscript(id) => NavigationTarget::transcript(id, ctx),
        // Passed through to the variant page, which performs the lookup
        ExternalId::RsId(id) | ExternalId::Caid(id) | ExternalId::ClinVar(id) => {
            NavigationTarget::variant(id, ctx)
        }
    };
    NavigationCandidate::new(external.as_str(), target)
}
