//! Query resolution.
//!
//! - [`rules`]: the ordered classification table
//! - [`resolve_local`]: classification plus candidate construction, offline
//! - [`decide_variant_type`]: variant type dispatch for direct navigation
//! - [`Resolver`]: search and direct-navigation modes, including remote lookups
//! - [`SearchSession`]: generation-guarded searches for interactive use

mod candidate;
mod dispatch;
mod local;
mod orchestrator;
mod remote;
pub mod rules;
mod session;

pub use candidate::{NavigationCandidate, NavigationTarget};
pub use dispatch::{decide_variant_type, VariantTypeDecision};
pub use local::{candidates_for, resolve_local, variant_candidate, LocalOutcome, DEFAULT_WINDOW_RADIUS};
pub use orchestrator::{Resolver, Route};
pub use remote::{label_gene_matches, parse_remote_variant_ids};
pub use rules::{classify, Rule, Scope, RULES};
pub use session::{SearchSession, SearchTicket};
