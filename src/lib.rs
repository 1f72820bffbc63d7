// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-resolve: query resolution and routing for a genomic variation browser
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Free-text queries are classified against an ordered rule table, normalized
//! into typed identifiers, and turned into navigation candidates. Gene symbols
//! that cannot be resolved locally fall back to a remote search.
//!
//! # Example
//!
//! ```
//! use ferro_resolve::dataset::DatasetContext;
//! use ferro_resolve::resolve::{resolve_local, LocalOutcome, DEFAULT_WINDOW_RADIUS};
//!
//! let ctx = DatasetContext::new("gnomad_r4");
//! match resolve_local("chr1:55516888:g:ga", &ctx, DEFAULT_WINDOW_RADIUS) {
//!     LocalOutcome::Candidates(candidates) => {
//!         assert_eq!(candidates[0].target.to_string(), "/variant/1-55516888-G-GA?dataset=gnomad_r4");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod help;
pub mod identifiers;
pub mod lookup;
pub mod resolve;
#[cfg(feature = "web-service")]
pub mod service;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use dataset::{DatasetContext, ReferenceGenome, SvNaming};
pub use error::{ErrorCode, ResolveError};
pub use help::{HelpDocument, HelpHit, HelpIndex};
pub use identifiers::{ExternalId, Identifier, IdentifierKind, RegionId, StructuralVariantId, VariantId};
pub use lookup::{GeneMatch, GeneSearch, GraphQlClient, MockLookup, VariantSearch};
pub use resolve::{
    classify, NavigationCandidate, NavigationTarget, Resolver, Route, SearchSession,
    VariantTypeDecision,
};

/// Result type alias for ferro-resolve operations
pub type Result<T> = std::result::Result<T, ResolveError>;
